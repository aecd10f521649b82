//! Brokerage capability port.

use async_trait::async_trait;

use crate::domain::error::ChattraderError;
use crate::domain::order::{OrderRequest, OrderResult};
use crate::domain::position::Position;

/// Account access consumed by the order engine.
///
/// Implementations are shared across concurrently handled messages and must
/// be safe to call from several tasks at once.
#[async_trait]
pub trait BrokeragePort: Send + Sync {
    async fn list_positions(&self) -> Result<Vec<Position>, ChattraderError>;

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, ChattraderError>;
}
