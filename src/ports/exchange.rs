//! Exchange Client Port - Remote Order Operations Interface
//!
//! Defines the trait the reconciliation engine requires for querying,
//! cancelling, and placing orders on the exchange. Pure I/O boundary;
//! no business logic. Failures surface as `Err`/absent results which
//! the engine recovers from per record — they never abort a pass.

use async_trait::async_trait;

use crate::domain::order::{OrderSpec, OrderStatus};

/// Remote view of a single order, as reported by the exchange.
///
/// Every field is optional: the exchange may omit any of them, and an
/// empty response body is a valid (empty) view.
#[derive(Debug, Clone, Default)]
pub struct OrderView {
    /// Parsed remote status, `None` when the response carried none.
    pub status: Option<OrderStatus>,
    /// Cumulative quote quantity as the raw reported string.
    pub cum_quote_quantity: Option<String>,
    /// Cumulative commission as the raw reported string.
    pub cum_commission: Option<String>,
}

/// Acknowledgement of an accepted order placement.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// Exchange-assigned order ID.
    pub order_id: String,
    /// Initial status, if the exchange reported one.
    pub status: Option<OrderStatus>,
}

/// Trait for remote order operations.
///
/// All calls are synchronous from the engine's perspective: one
/// request, one bounded-timeout response. Implementors own transport
/// concerns (auth, retries, rate limiting).
#[async_trait]
pub trait ExchangeClient: Send + Sync + 'static {
    /// Fetch the current remote state of an order.
    async fn get_order(&self, order_id: &str) -> anyhow::Result<OrderView>;

    /// Cancel an open order. `Ok(false)` means the exchange rejected
    /// the cancellation (e.g. already filled).
    async fn cancel_order(&self, order_id: &str) -> anyhow::Result<bool>;

    /// Place a new order. `Ok(None)` means the exchange did not accept
    /// it (no order ID was assigned).
    async fn place_order(&self, spec: &OrderSpec) -> anyhow::Result<Option<PlacedOrder>>;
}
