//! Position resolution for "sell all" intents.
//!
//! Holdings are read once and the order is submitted later in a separate
//! call. Nothing locks the position in between: a concurrent trade on the same
//! symbol can change it, and the order goes out with the quantity read here.

use tracing::debug;

use crate::domain::error::ChattraderError;
use crate::domain::intent::TradingIntent;
use crate::domain::position::held_quantity;
use crate::ports::brokerage_port::BrokeragePort;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Ready to dispatch. `quantity` is the share count read from holdings for
    /// sell-all intents and zero for every other intent.
    Ready {
        intent: TradingIntent,
        quantity: u64,
    },
    /// A sell-all intent found nothing to sell. Not an error.
    NoPosition { symbol: String },
}

pub async fn resolve(
    intent: TradingIntent,
    broker: &dyn BrokeragePort,
) -> Result<Resolution, ChattraderError> {
    if !intent.sells_all() {
        return Ok(Resolution::Ready {
            intent,
            quantity: 0,
        });
    }

    let symbol = intent.symbol().unwrap_or_default().to_string();
    let positions = broker.list_positions().await?;
    let held = held_quantity(&positions, &symbol);
    debug!(symbol = %symbol, held, "resolved holdings");

    // Short or flat holdings leave nothing to sell.
    match u64::try_from(held) {
        Ok(quantity) if quantity > 0 => Ok(Resolution::Ready { intent, quantity }),
        _ => Ok(Resolution::NoPosition { symbol }),
    }
}
