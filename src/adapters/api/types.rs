//! ATAIX API Request/Response Types
//!
//! Serde types for the exchange's REST envelope. Responses are
//! tolerant by construction: every field is defaulted, numeric fields
//! may arrive as JSON strings or numbers, and an unparseable envelope
//! degrades to its default rather than failing the caller.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::order::{quantize_price, OrderSpec};

/// Order placement payload for `POST /api/orders`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub quantity: Decimal,
    /// Limit price, formatted to the 4-digit tick (`"101.0000"`).
    pub price: String,
}

impl CreateOrderRequest {
    pub fn from_spec(spec: &OrderSpec) -> Self {
        Self {
            symbol: spec.symbol.clone(),
            side: spec.side.to_string(),
            order_type: spec.order_type.to_string(),
            quantity: spec.quantity,
            price: quantize_price(spec.price).to_string(),
        }
    }
}

/// The `result` object of order queries and placements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderResult {
    #[serde(rename = "orderID", default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "cumQuoteQuantity", default, deserialize_with = "stringly")]
    pub cum_quote_quantity: Option<String>,
    #[serde(rename = "cumCommission", default, deserialize_with = "stringly")]
    pub cum_commission: Option<String>,
}

/// Envelope of `GET /api/orders/{id}` and `POST /api/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderEnvelope {
    #[serde(default)]
    pub result: Option<OrderResult>,
}

/// Envelope of `DELETE /api/orders/{id}` — `status: "success"` marks a
/// completed cancellation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelEnvelope {
    #[serde(default, deserialize_with = "stringly")]
    pub status: Option<String>,
}

/// Accept a JSON string or number, keeping it as the raw string.
fn stringly<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}
