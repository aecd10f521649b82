#![allow(dead_code)]

use async_trait::async_trait;
use chattrader::domain::error::ChattraderError;
use chattrader::domain::order::{OrderRequest, OrderResult};
pub use chattrader::domain::position::Position;
use chattrader::domain::router::Router;
use chattrader::ports::brokerage_port::BrokeragePort;
use chattrader::ports::chat_port::{ChatPort, InboundMessage};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CHANNEL: i64 = -1001234567890;
pub const OTHER_CHANNEL: i64 = 555;

pub struct MockBroker {
    pub positions: Vec<Position>,
    pub list_error: Option<String>,
    pub submit_error: Option<String>,
    pub order_id: String,
    pub list_calls: AtomicUsize,
    pub orders: Mutex<Vec<OrderRequest>>,
}

impl MockBroker {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            list_error: None,
            submit_error: None,
            order_id: "abc123".to_string(),
            list_calls: AtomicUsize::new(0),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn with_position(mut self, symbol: &str, quantity: i64, market_value: Decimal) -> Self {
        self.positions.push(Position {
            symbol: symbol.to_string(),
            quantity,
            market_value,
        });
        self
    }

    pub fn with_order_id(mut self, id: &str) -> Self {
        self.order_id = id.to_string();
        self
    }

    pub fn with_list_error(mut self, reason: &str) -> Self {
        self.list_error = Some(reason.to_string());
        self
    }

    pub fn with_submit_error(mut self, reason: &str) -> Self {
        self.submit_error = Some(reason.to_string());
        self
    }

    pub fn submitted(&self) -> Vec<OrderRequest> {
        self.orders.lock().unwrap().clone()
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.list_call_count() + self.submitted().len()
    }
}

#[async_trait]
impl BrokeragePort for MockBroker {
    async fn list_positions(&self) -> Result<Vec<Position>, ChattraderError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.list_error {
            return Err(ChattraderError::Brokerage {
                reason: reason.clone(),
            });
        }
        Ok(self.positions.clone())
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, ChattraderError> {
        self.orders.lock().unwrap().push(order.clone());
        if let Some(reason) = &self.submit_error {
            return Err(ChattraderError::Brokerage {
                reason: reason.clone(),
            });
        }
        Ok(OrderResult {
            order_id: self.order_id.clone(),
        })
    }
}

/// Broker whose position listing panics, for exercising task isolation.
pub struct PanickingBroker;

#[async_trait]
impl BrokeragePort for PanickingBroker {
    async fn list_positions(&self) -> Result<Vec<Position>, ChattraderError> {
        panic!("position feed exploded");
    }

    async fn submit_order(&self, _order: &OrderRequest) -> Result<OrderResult, ChattraderError> {
        panic!("order feed exploded");
    }
}

/// Scripted chat transport. Each poll pops one batch; once the script is
/// exhausted it behaves like an idle long poll.
pub struct MockChat {
    pub batches: Mutex<VecDeque<Result<Vec<InboundMessage>, String>>>,
    pub sent: Mutex<Vec<(i64, String)>>,
    pub fail_sends: bool,
    pub polls: AtomicUsize,
}

impl MockChat {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            fail_sends: false,
            polls: AtomicUsize::new(0),
        }
    }

    pub fn with_batch(self, messages: &[(i64, &str)]) -> Self {
        let batch = messages
            .iter()
            .map(|(channel_id, text)| InboundMessage {
                channel_id: *channel_id,
                text: text.to_string(),
            })
            .collect();
        self.batches.lock().unwrap().push_back(Ok(batch));
        self
    }

    pub fn with_poll_error(self, reason: &str) -> Self {
        self.batches
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatPort for MockChat {
    async fn poll(&self) -> Result<Vec<InboundMessage>, ChattraderError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(Ok(batch)) => Ok(batch),
            Some(Err(reason)) => Err(ChattraderError::Transport { reason }),
            None => {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn send(&self, channel_id: i64, text: &str) -> Result<(), ChattraderError> {
        if self.fail_sends {
            return Err(ChattraderError::Transport {
                reason: "send refused".to_string(),
            });
        }
        self.sent.lock().unwrap().push((channel_id, text.to_string()));
        Ok(())
    }
}

pub fn router_with(broker: Arc<dyn BrokeragePort>) -> Arc<Router> {
    Arc::new(Router::new([CHANNEL].into_iter().collect(), broker).unwrap())
}

/// Wait until `done` holds, polling briefly. Panics after two seconds.
pub async fn wait_for(done: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !done() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
}
