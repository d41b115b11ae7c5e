//! Configuration Module - TOML-based Bot Configuration
//!
//! Loads and validates configuration from `config.toml`. Endpoints,
//! file paths and policy steps are externalized here — nothing is
//! hardcoded in the domain layer, and no process-wide mutable state
//! exists. Credentials are NOT part of the file; they come from the
//! environment (`ATAIX_API_KEY`).

pub mod loader;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Top-level bot configuration, loaded from `config.toml` at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Bot identity and metadata.
    pub bot: BotConfig,
    /// Exchange API endpoint settings.
    pub api: ApiConfig,
    /// Rate limiting configuration.
    #[serde(default)]
    pub rate_limits: RateLimitConfig,
    /// Ledger persistence configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Pricing policy steps.
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Human-readable bot name.
    pub name: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Exchange REST API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Maximum retries on transient errors.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Minimum interval between exchange requests (milliseconds).
    #[serde(default = "default_min_interval")]
    pub min_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval(),
        }
    }
}

/// Ledger persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Path of the JSON ledger file.
    #[serde(default = "default_ledger_path")]
    pub path: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

/// Pricing policy steps, in percent.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Price step for replacing a stale buy order.
    #[serde(default = "default_escalation_step")]
    pub escalation_step_pct: Decimal,
    /// Markup over the buy price for the spawned sell order.
    #[serde(default = "default_sell_markup")]
    pub sell_markup_pct: Decimal,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            escalation_step_pct: default_escalation_step(),
            sell_markup_pct: default_sell_markup(),
        }
    }
}

// Default value functions for serde

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_max_retries() -> u32 {
    3
}

fn default_min_interval() -> u64 {
    1000
}

fn default_ledger_path() -> String {
    "orders_data.json".to_string()
}

fn default_escalation_step() -> Decimal {
    dec!(1)
}

fn default_sell_markup() -> Decimal {
    dec!(2)
}
