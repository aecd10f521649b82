//! Intent validation.
//!
//! Turns captured tokens into a [`TradingIntent`]. Runs before any brokerage
//! call, so a rejected command never reaches the broker.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::error::ValidationError;
use crate::domain::intent::{RawCommand, TradingIntent};

pub fn validate(command: RawCommand) -> Result<TradingIntent, ValidationError> {
    let intent = match command {
        RawCommand::Buy { quantity, symbol } => TradingIntent::Buy {
            quantity: parse_quantity(&quantity)?,
            symbol: normalize_symbol(&symbol)?,
        },
        RawCommand::SellAll { symbol } => TradingIntent::SellAll {
            symbol: normalize_symbol(&symbol)?,
        },
        RawCommand::SellQuantity { quantity, symbol } => TradingIntent::SellQuantity {
            quantity: parse_quantity(&quantity)?,
            symbol: normalize_symbol(&symbol)?,
        },
        RawCommand::LimitSellAll { symbol, price } => TradingIntent::LimitSellAll {
            symbol: normalize_symbol(&symbol)?,
            limit_price: parse_price(&price)?,
        },
        RawCommand::LimitSellQuantity {
            quantity,
            symbol,
            price,
        } => TradingIntent::LimitSellQuantity {
            quantity: parse_quantity(&quantity)?,
            symbol: normalize_symbol(&symbol)?,
            limit_price: parse_price(&price)?,
        },
        RawCommand::Portfolio => TradingIntent::PortfolioQuery,
    };
    Ok(intent)
}

pub fn parse_quantity(raw: &str) -> Result<u64, ValidationError> {
    match raw.trim().parse::<u64>() {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(ValidationError::InvalidQuantity(raw.to_string())),
    }
}

pub fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    match Decimal::from_str(raw.trim()) {
        Ok(p) if p > Decimal::ZERO => Ok(p),
        _ => Err(ValidationError::InvalidPrice(raw.to_string())),
    }
}

pub fn normalize_symbol(raw: &str) -> Result<String, ValidationError> {
    let symbol = raw.trim();
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidSymbol(raw.to_string()));
    }
    Ok(symbol.to_ascii_uppercase())
}
