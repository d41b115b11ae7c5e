//! ATAIX Exchange Adapter — Implements the `ExchangeClient` Port
//!
//! Maps the port's order operations onto the exchange's REST
//! endpoints via the shared rate-limited `AtaixClient`. Response
//! parsing is deliberately forgiving: a missing `result`, an empty
//! body, or an unknown status string all degrade to an empty view —
//! the reconciliation engine decides what to do with the absence.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::client::AtaixClient;
use super::types::{CancelEnvelope, CreateOrderRequest, OrderEnvelope, OrderResult};
use crate::domain::order::{OrderSpec, OrderStatus};
use crate::ports::exchange::{ExchangeClient, OrderView, PlacedOrder};

/// `ExchangeClient` implementation backed by the ATAIX REST API.
///
/// Uses the shared `AtaixClient` for all requests (inherits API-key
/// auth, retry logic, and inter-request spacing). Never creates its
/// own reqwest client.
pub struct AtaixExchange {
    client: Arc<AtaixClient>,
}

impl AtaixExchange {
    pub fn new(client: Arc<AtaixClient>) -> Self {
        Self { client }
    }
}

/// Decode an envelope, degrading unrecognized shapes to the default.
fn parse_envelope<T: DeserializeOwned + Default>(value: serde_json::Value) -> T {
    if value.is_null() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        debug!(error = %e, "Unrecognized response shape");
        T::default()
    })
}

fn view_from_result(result: Option<OrderResult>) -> OrderView {
    let Some(result) = result else {
        return OrderView::default();
    };
    OrderView {
        status: result.status.as_deref().map(OrderStatus::from_wire),
        cum_quote_quantity: result.cum_quote_quantity,
        cum_commission: result.cum_commission,
    }
}

#[async_trait]
impl ExchangeClient for AtaixExchange {
    #[instrument(skip(self))]
    async fn get_order(&self, order_id: &str) -> Result<OrderView> {
        let value = self
            .client
            .get(&format!("/api/orders/{order_id}"))
            .await
            .context("Order status query failed")?;
        let envelope: OrderEnvelope = parse_envelope(value);
        Ok(view_from_result(envelope.result))
    }

    #[instrument(skip(self))]
    async fn cancel_order(&self, order_id: &str) -> Result<bool> {
        let value = self
            .client
            .delete(&format!("/api/orders/{order_id}"))
            .await
            .context("Order cancellation failed")?;
        let envelope: CancelEnvelope = parse_envelope(value);
        Ok(envelope.status.as_deref() == Some("success"))
    }

    #[instrument(skip(self, spec), fields(symbol = %spec.symbol, side = %spec.side, price = %spec.price))]
    async fn place_order(&self, spec: &OrderSpec) -> Result<Option<PlacedOrder>> {
        let payload = serde_json::to_value(CreateOrderRequest::from_spec(spec))
            .context("Failed to serialize order payload")?;
        let value = self
            .client
            .post("/api/orders", &payload)
            .await
            .context("Order placement failed")?;
        let envelope: OrderEnvelope = parse_envelope(value);

        let placed = envelope.result.and_then(|result| {
            let order_id = result.order_id.filter(|id| !id.is_empty())?;
            Some(PlacedOrder {
                order_id,
                status: result.status.as_deref().map(OrderStatus::from_wire),
            })
        });
        Ok(placed)
    }
}
