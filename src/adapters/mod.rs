//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, file I/O).
//!
//! Adapter categories:
//! - `api`: ATAIX REST API client and the `ExchangeClient` port impl
//! - `persistence`: JSON ledger file store

pub mod api;
pub mod persistence;
