//! Persistence Adapters - JSON File Storage
//!
//! Implements the `OrderStore` port with a single atomically-written
//! JSON file. No database dependency — lightweight and
//! crash-recoverable.

pub mod ledger;

pub use ledger::JsonLedgerStore;
