//! Command and intent types.
//!
//! A [`RawCommand`] is what the grammar extracts from text: the matched shape
//! plus the captured tokens, still unchecked. A [`TradingIntent`] is the
//! validated form with parsed numbers and an upper-cased symbol.

use rust_decimal::Decimal;
use std::fmt;

use crate::domain::reply::money;

/// Tokens captured by a matched grammar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawCommand {
    Buy {
        quantity: String,
        symbol: String,
    },
    SellAll {
        symbol: String,
    },
    SellQuantity {
        quantity: String,
        symbol: String,
    },
    LimitSellAll {
        symbol: String,
        price: String,
    },
    LimitSellQuantity {
        quantity: String,
        symbol: String,
        price: String,
    },
    Portfolio,
}

/// Outcome of classifying one line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Command(RawCommand),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TradingIntent {
    Buy {
        symbol: String,
        quantity: u64,
    },
    SellQuantity {
        symbol: String,
        quantity: u64,
    },
    SellAll {
        symbol: String,
    },
    LimitSellQuantity {
        symbol: String,
        quantity: u64,
        limit_price: Decimal,
    },
    LimitSellAll {
        symbol: String,
        limit_price: Decimal,
    },
    PortfolioQuery,
}

impl TradingIntent {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            TradingIntent::Buy { symbol, .. }
            | TradingIntent::SellQuantity { symbol, .. }
            | TradingIntent::SellAll { symbol }
            | TradingIntent::LimitSellQuantity { symbol, .. }
            | TradingIntent::LimitSellAll { symbol, .. } => Some(symbol),
            TradingIntent::PortfolioQuery => None,
        }
    }

    /// True for the "all shares" variants whose quantity comes from holdings.
    pub fn sells_all(&self) -> bool {
        matches!(
            self,
            TradingIntent::SellAll { .. } | TradingIntent::LimitSellAll { .. }
        )
    }
}

impl fmt::Display for TradingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingIntent::Buy { symbol, quantity } => write!(f, "BUY {quantity} {symbol}"),
            TradingIntent::SellQuantity { symbol, quantity } => {
                write!(f, "SELL {quantity} {symbol}")
            }
            TradingIntent::SellAll { symbol } => write!(f, "SELL {symbol}"),
            TradingIntent::LimitSellQuantity {
                symbol,
                quantity,
                limit_price,
            } => write!(f, "SELL {quantity} {symbol} LIMIT {}", money(*limit_price)),
            TradingIntent::LimitSellAll {
                symbol,
                limit_price,
            } => write!(f, "SELL {symbol} LIMIT {}", money(*limit_price)),
            TradingIntent::PortfolioQuery => write!(f, "PORTFOLIO"),
        }
    }
}
