//! Per-message command routing.
//!
//! The router gates on the channel allow-set, classifies the text, and runs
//! validate -> resolve -> dispatch. Every failure in that chain is turned into
//! a warning reply here and nowhere else.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::dispatcher;
use crate::domain::error::ChattraderError;
use crate::domain::grammar::Grammar;
use crate::domain::intent::{Classification, RawCommand};
use crate::domain::reply::{self, Acknowledgement};
use crate::domain::resolver;
use crate::domain::validator;
use crate::ports::brokerage_port::BrokeragePort;

pub struct Router {
    grammar: Grammar,
    allowed_channels: HashSet<i64>,
    broker: Arc<dyn BrokeragePort>,
}

impl Router {
    pub fn new(
        allowed_channels: HashSet<i64>,
        broker: Arc<dyn BrokeragePort>,
    ) -> Result<Self, ChattraderError> {
        Ok(Self {
            grammar: Grammar::new()?,
            allowed_channels,
            broker,
        })
    }

    pub fn is_authorized(&self, channel_id: i64) -> bool {
        self.allowed_channels.contains(&channel_id)
    }

    /// Handle one inbound message. Returns `None` only for channels outside
    /// the allow-set; every authorized message gets exactly one reply.
    pub async fn handle(&self, channel_id: i64, text: &str) -> Option<Acknowledgement> {
        if !self.is_authorized(channel_id) {
            debug!(channel_id, "dropping message from unauthorized channel");
            return None;
        }

        let line = text.trim();
        let text = match self.grammar.classify(line) {
            Classification::Unrecognized => {
                info!(channel_id, line, "unrecognized command");
                reply::HELP_TEXT.to_string()
            }
            Classification::Command(command) => match self.execute(command).await {
                Ok(text) => text,
                Err(ChattraderError::Validation(err)) => {
                    warn!(channel_id, line, error = %err, "command rejected");
                    reply::warning(&err)
                }
                Err(err) => {
                    error!(channel_id, line, error = ?err, "command error");
                    reply::warning(&err)
                }
            },
        };
        Some(Acknowledgement { channel_id, text })
    }

    /// Like [`Router::handle`], but runs the chain in its own task so a panic
    /// inside it still yields a warning reply instead of silence.
    pub async fn handle_isolated(
        self: Arc<Self>,
        channel_id: i64,
        text: String,
    ) -> Option<Acknowledgement> {
        let router = Arc::clone(&self);
        let task = tokio::spawn(async move { router.handle(channel_id, &text).await });
        match task.await {
            Ok(ack) => ack,
            Err(err) => {
                error!(channel_id, error = %err, "command task failed");
                self.is_authorized(channel_id).then(|| Acknowledgement {
                    channel_id,
                    text: reply::warning(&err),
                })
            }
        }
    }

    async fn execute(&self, command: RawCommand) -> Result<String, ChattraderError> {
        let intent = validator::validate(command)?;
        debug!(intent = %intent, "validated");
        let resolution = resolver::resolve(intent, self.broker.as_ref()).await?;
        dispatcher::dispatch(resolution, self.broker.as_ref()).await
    }
}
