//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        base_url = %config.api.base_url,
        ledger = %config.ledger.path,
        min_interval_ms = config.rate_limits.min_interval_ms,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(!config.bot.name.is_empty(), "Bot name must not be empty");

    anyhow::ensure!(
        !config.api.base_url.is_empty(),
        "API base URL must not be empty"
    );
    anyhow::ensure!(
        config.api.timeout_seconds > 0,
        "API timeout must be positive, got {}",
        config.api.timeout_seconds
    );

    anyhow::ensure!(
        config.rate_limits.min_interval_ms > 0,
        "min_interval_ms must be positive, got {}",
        config.rate_limits.min_interval_ms
    );

    anyhow::ensure!(
        !config.ledger.path.is_empty(),
        "Ledger path must not be empty"
    );

    anyhow::ensure!(
        config.policy.escalation_step_pct > Decimal::ZERO,
        "escalation_step_pct must be positive, got {}",
        config.policy.escalation_step_pct
    );
    anyhow::ensure!(
        config.policy.sell_markup_pct > Decimal::ZERO,
        "sell_markup_pct must be positive, got {}",
        config.policy.sell_markup_pct
    );

    Ok(())
}
