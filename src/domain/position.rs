//! Brokerage position snapshot.

use rust_decimal::Decimal;

/// A held symbol as last reported by the brokerage. Read-only to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub quantity: i64,
    pub market_value: Decimal,
}

/// Quantity of the first position matching `symbol`, or zero when none is held.
pub fn held_quantity(positions: &[Position], symbol: &str) -> i64 {
    positions
        .iter()
        .find(|p| p.symbol == symbol)
        .map(|p| p.quantity)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_positions() -> Vec<Position> {
        vec![
            Position {
                symbol: "AAPL".into(),
                quantity: 3,
                market_value: dec!(450.00),
            },
            Position {
                symbol: "TSLA".into(),
                quantity: -2,
                market_value: dec!(-500.00),
            },
        ]
    }

    #[test]
    fn held_quantity_finds_symbol() {
        assert_eq!(held_quantity(&sample_positions(), "AAPL"), 3);
    }

    #[test]
    fn held_quantity_missing_symbol_is_zero() {
        assert_eq!(held_quantity(&sample_positions(), "MSFT"), 0);
        assert_eq!(held_quantity(&[], "AAPL"), 0);
    }

    #[test]
    fn held_quantity_is_case_sensitive() {
        assert_eq!(held_quantity(&sample_positions(), "aapl"), 0);
    }

    #[test]
    fn held_quantity_takes_first_match() {
        let mut positions = sample_positions();
        positions.push(Position {
            symbol: "AAPL".into(),
            quantity: 99,
            market_value: dec!(1.00),
        });
        assert_eq!(held_quantity(&positions, "AAPL"), 3);
    }
}
