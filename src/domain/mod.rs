//! Domain layer - Core business logic and models.
//!
//! Pure types and policies for the order-lifecycle reconciliation bot.
//! No external dependencies allowed here (hexagonal architecture inner
//! ring). All types are serializable and testable in isolation.

pub mod escalation;
pub mod order;
pub mod profit;
pub mod spawn;

// Re-export core types for convenience
pub use escalation::EscalationPolicy;
pub use order::{OrderKind, OrderRecord, OrderSpec, OrderStatus, Profit, Side};
pub use profit::{ProfitCalculator, Settlement};
pub use spawn::SellSpawnPolicy;
