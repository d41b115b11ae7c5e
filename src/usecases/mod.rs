//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain policies with the port interfaces. The single
//! use case here is the reconciliation engine: one pass over the
//! ledger under one of its three modes.

pub mod reconciler;

pub use reconciler::{PassSummary, ReconcileMode, ReconciliationEngine};
