//! ATAIX REST API Adapter
//!
//! Implements the HTTP transport for the exchange: static API-key
//! authentication, bounded retries, global request spacing, and the
//! `ExchangeClient` port on top of it.
//!
//! Sub-modules:
//! - `client`: HTTP client with rate limiting and retries
//! - `exchange`: `ExchangeClient` port implementation
//! - `types`: API request/response type definitions

pub mod client;
pub mod exchange;
pub mod types;
