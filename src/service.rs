//! The long-running bot loop.
//!
//! Polls the chat transport, hands every inbound message to its own task and
//! sends back whatever acknowledgement the router produces. Messages are
//! processed concurrently, so replies may arrive out of order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, warn};

use crate::domain::router::Router;
use crate::ports::chat_port::{ChatPort, InboundMessage};

pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

pub struct BotService {
    router: Arc<Router>,
    chat: Arc<dyn ChatPort>,
    retry_delay: Duration,
}

impl BotService {
    pub fn new(router: Arc<Router>, chat: Arc<dyn ChatPort>) -> Self {
        Self {
            router,
            chat,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Delay before polling again after a transport failure.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Run until `shutdown` resolves, then wait for in-flight messages to
    /// finish so no accepted command loses its reply.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut tasks = JoinSet::new();
        info!("bot is up and running, polling for messages");

        loop {
            while let Some(finished) = tasks.try_join_next() {
                log_join(finished);
            }

            let polled = tokio::select! {
                _ = &mut shutdown => break,
                polled = self.chat.poll() => polled,
            };

            match polled {
                Ok(messages) => {
                    for message in messages {
                        tasks.spawn(handle_and_reply(
                            Arc::clone(&self.router),
                            Arc::clone(&self.chat),
                            message,
                        ));
                    }
                }
                Err(err) => {
                    warn!(error = %err, delay = ?self.retry_delay, "poll failed, retrying");
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }

        info!(in_flight = tasks.len(), "shutting down");
        while let Some(finished) = tasks.join_next().await {
            log_join(finished);
        }
        info!("bot stopped");
    }
}

/// Route one message and deliver its reply. A failed send is logged and
/// dropped; the command it acknowledges has already been executed.
pub async fn handle_and_reply(
    router: Arc<Router>,
    chat: Arc<dyn ChatPort>,
    message: InboundMessage,
) {
    let Some(ack) = router
        .handle_isolated(message.channel_id, message.text)
        .await
    else {
        return;
    };
    if let Err(err) = chat.send(ack.channel_id, &ack.text).await {
        error!(channel_id = ack.channel_id, error = %err, "failed to send reply");
    }
}

fn log_join(finished: Result<(), JoinError>) {
    if let Err(err) = finished {
        error!(error = %err, "message task failed");
    }
}
