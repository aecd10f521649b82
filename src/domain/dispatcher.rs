//! Order dispatch.
//!
//! Executes a resolved intent as at most one brokerage call and renders the
//! acknowledgement text. Submission failures are returned, never retried.

use tracing::info;

use crate::domain::error::ChattraderError;
use crate::domain::order::OrderRequest;
use crate::domain::reply;
use crate::domain::resolver::Resolution;
use crate::ports::brokerage_port::BrokeragePort;

pub async fn dispatch(
    resolution: Resolution,
    broker: &dyn BrokeragePort,
) -> Result<String, ChattraderError> {
    let (intent, quantity) = match resolution {
        Resolution::NoPosition { symbol } => {
            info!(symbol = %symbol, "no position to sell");
            return Ok(reply::no_position(&symbol));
        }
        Resolution::Ready { intent, quantity } => (intent, quantity),
    };

    let Some(order) = OrderRequest::for_intent(&intent, quantity) else {
        let positions = broker.list_positions().await?;
        return Ok(reply::portfolio(&positions));
    };

    let result = broker.submit_order(&order).await?;
    info!(
        symbol = %order.symbol,
        quantity = order.quantity,
        side = %order.side,
        order_type = %order.order_type,
        order_id = %result.order_id,
        "order submitted"
    );
    Ok(reply::order_placed(&intent, &order, &result))
}
