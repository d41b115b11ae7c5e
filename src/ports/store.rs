//! Order Store Port - Ledger Persistence Interface
//!
//! Whole-ledger read/replace semantics: a pass loads the full ledger
//! into memory at the start and persists it exactly once at the end.
//! No partial updates, last writer wins.

use async_trait::async_trait;

use crate::domain::order::OrderRecord;

/// Trait for persisting the order ledger.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Load the full ledger. No prior state is an empty ledger, not an
    /// error.
    async fn load(&self) -> anyhow::Result<Vec<OrderRecord>>;

    /// Replace the persisted ledger with `ledger`. Expected to be
    /// atomic from the engine's point of view.
    async fn save(&self, ledger: &[OrderRecord]) -> anyhow::Result<()>;
}
