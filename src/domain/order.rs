//! Order request and result types submitted to the brokerage.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::domain::intent::TradingIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeInForce {
    #[serde(rename = "gtc")]
    GoodTillCanceled,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
            OrderType::Limit => write!(f, "limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: String,
    pub quantity: u64,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub limit_price: Option<Decimal>,
    pub time_in_force: TimeInForce,
}

impl OrderRequest {
    /// Build the single order for `intent`. `resolved_quantity` is used by the
    /// sell-all variants and ignored otherwise. Portfolio queries submit nothing.
    pub fn for_intent(intent: &TradingIntent, resolved_quantity: u64) -> Option<Self> {
        let (symbol, quantity, side, limit_price) = match intent {
            TradingIntent::Buy { symbol, quantity } => (symbol, *quantity, OrderSide::Buy, None),
            TradingIntent::SellQuantity { symbol, quantity } => {
                (symbol, *quantity, OrderSide::Sell, None)
            }
            TradingIntent::SellAll { symbol } => {
                (symbol, resolved_quantity, OrderSide::Sell, None)
            }
            TradingIntent::LimitSellQuantity {
                symbol,
                quantity,
                limit_price,
            } => (symbol, *quantity, OrderSide::Sell, Some(*limit_price)),
            TradingIntent::LimitSellAll {
                symbol,
                limit_price,
            } => (symbol, resolved_quantity, OrderSide::Sell, Some(*limit_price)),
            TradingIntent::PortfolioQuery => return None,
        };
        Some(Self {
            symbol: symbol.clone(),
            quantity,
            side,
            order_type: if limit_price.is_some() {
                OrderType::Limit
            } else {
                OrderType::Market
            },
            limit_price,
            time_in_force: TimeInForce::GoodTillCanceled,
        })
    }
}

/// Brokerage acceptance of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResult {
    pub order_id: String,
}
