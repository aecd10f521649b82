//! Alpaca trading REST adapter.
//!
//! Implements [`BrokeragePort`] against the `/v2/positions` and `/v2/orders`
//! endpoints. Credentials travel in headers only and are never logged.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::bot_config::AlpacaConfig;
use crate::domain::error::ChattraderError;
use crate::domain::order::{OrderRequest, OrderResult, OrderSide, OrderType, TimeInForce};
use crate::domain::position::Position;
use crate::ports::brokerage_port::BrokeragePort;

const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

pub struct AlpacaAdapter {
    http: reqwest::Client,
    base_url: String,
    api_key_id: String,
    api_secret_key: SecretString,
}

impl AlpacaAdapter {
    pub fn new(config: AlpacaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key_id: config.api_key_id,
            api_secret_key: config.api_secret_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(KEY_ID_HEADER, &self.api_key_id)
            .header(SECRET_KEY_HEADER, self.api_secret_key.expose_secret())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, ChattraderError> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| brokerage(format!("{what} request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(brokerage(format!(
                "{what} rejected with status {}: {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| brokerage(format!("{what} response could not be decoded: {e}")))
    }
}

fn brokerage(reason: String) -> ChattraderError {
    ChattraderError::Brokerage { reason }
}

/// Prefer the broker's `message` field, fall back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<AlpacaError>(body) {
        Ok(AlpacaError { message: Some(m) }) => m,
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl BrokeragePort for AlpacaAdapter {
    async fn list_positions(&self) -> Result<Vec<Position>, ChattraderError> {
        let request = self.http.get(self.endpoint("/v2/positions"));
        let positions: Vec<AlpacaPosition> = self.send(request, "list positions").await?;
        debug!(count = positions.len(), "fetched positions");
        Ok(positions.into_iter().map(Position::from).collect())
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, ChattraderError> {
        let body = AlpacaOrderBody::from(order);
        let request = self.http.post(self.endpoint("/v2/orders")).json(&body);
        let placed: AlpacaOrder = self.send(request, "submit order").await?;
        Ok(OrderResult { order_id: placed.id })
    }
}

#[derive(Debug, Deserialize)]
struct AlpacaPosition {
    symbol: String,
    qty: Decimal,
    #[serde(default)]
    market_value: Option<Decimal>,
}

impl From<AlpacaPosition> for Position {
    /// Fractional holdings are truncated to whole shares.
    fn from(p: AlpacaPosition) -> Self {
        Position {
            symbol: p.symbol,
            quantity: p.qty.trunc().to_i64().unwrap_or(0),
            market_value: p.market_value.unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Serialize)]
struct AlpacaOrderBody {
    symbol: String,
    qty: String,
    side: OrderSide,
    #[serde(rename = "type")]
    order_type: OrderType,
    time_in_force: TimeInForce,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit_price: Option<Decimal>,
}

impl From<&OrderRequest> for AlpacaOrderBody {
    fn from(order: &OrderRequest) -> Self {
        Self {
            symbol: order.symbol.clone(),
            qty: order.quantity.to_string(),
            side: order.side,
            order_type: order.order_type,
            time_in_force: order.time_in_force,
            limit_price: order.limit_price,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlpacaOrder {
    id: String,
}

#[derive(Debug, Deserialize)]
struct AlpacaError {
    message: Option<String>,
}
