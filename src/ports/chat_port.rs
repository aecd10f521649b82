//! Chat transport port.

use async_trait::async_trait;

use crate::domain::error::ChattraderError;

/// One text message delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub channel_id: i64,
    pub text: String,
}

#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Wait for the next batch of text messages. An empty batch is normal.
    async fn poll(&self) -> Result<Vec<InboundMessage>, ChattraderError>;

    async fn send(&self, channel_id: i64, text: &str) -> Result<(), ChattraderError>;
}
