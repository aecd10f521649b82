//! Acknowledgement texts sent back to the originating chat.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Write;

use crate::domain::intent::TradingIntent;
use crate::domain::order::{OrderRequest, OrderResult};
use crate::domain::position::Position;

/// Longest error text forwarded to a chat, in characters.
pub const MAX_ERROR_CHARS: usize = 300;

pub const HELP_TEXT: &str = "❓ Unknown command.\nSupported:\n\
    • BUY <qty> <SYMBOL>\n\
    • SELL <SYMBOL>\n\
    • SELL <qty> <SYMBOL>\n\
    • SELL <SYMBOL> LIMIT <price>\n\
    • SELL <qty> <SYMBOL> LIMIT <price>\n\
    • PORTFOLIO";

/// The single reply produced for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub channel_id: i64,
    pub text: String,
}

/// Render a price or value to cents, rounding half away from zero.
pub fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn order_placed(intent: &TradingIntent, order: &OrderRequest, result: &OrderResult) -> String {
    let qty = order.quantity;
    let symbol = &order.symbol;
    let id = &result.order_id;
    match (intent, order.limit_price) {
        (TradingIntent::Buy { .. }, _) => {
            format!("✅ Bought {qty} shares of {symbol}. Order ID: {id}")
        }
        (TradingIntent::SellAll { .. }, _) => {
            format!("✅ Sold all ({qty}) shares of {symbol}. Order ID: {id}")
        }
        (TradingIntent::LimitSellAll { .. }, Some(price)) => format!(
            "✅ Placed GTC LIMIT sell of all ({qty}) {symbol} @ ${}. ID {id}",
            money(price)
        ),
        (_, Some(price)) => format!(
            "✅ Placed GTC LIMIT sell of {qty} {symbol} @ ${}. ID {id}",
            money(price)
        ),
        (_, None) => format!("✅ Sold {qty} shares of {symbol}. Order ID: {id}"),
    }
}

pub fn no_position(symbol: &str) -> String {
    format!("⚠️ No position in {symbol}.")
}

pub fn portfolio(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "📭 No open positions.".to_string();
    }
    let mut text = String::from("📊 Your portfolio:");
    for p in positions {
        let _ = write!(
            text,
            "\n{}: {} shares, Value ${}",
            p.symbol,
            p.quantity,
            money(p.market_value)
        );
    }
    text
}

pub fn warning(err: &dyn std::error::Error) -> String {
    format!("⚠️ Error: {}", truncate(&err.to_string(), MAX_ERROR_CHARS))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
