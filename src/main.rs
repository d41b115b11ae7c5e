//! ATAIX Reconciliation Bot — Entry Point
//!
//! Runs exactly one reconciliation pass in the mode given on the
//! command line, prints a summary, and exits. Scheduling cadence
//! (cron vs loop) lives outside the process.
//!
//! Wiring sequence:
//! 1. Parse mode (escalate | spawn-sell | settle-profit) + config path
//! 2. Load config.toml + validate
//! 3. Init tracing (JSON structured logging)
//! 4. Load API key from env (ATAIX_API_KEY)
//! 5. Create AtaixClient (HTTP + auth + retry + request spacing)
//! 6. Create AtaixExchange (ExchangeClient port) + JsonLedgerStore
//! 7. Run the pass; SIGINT ends it early but still persists

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::client::{ApiCredentials, AtaixClient, AtaixClientConfig};
use adapters::api::exchange::AtaixExchange;
use adapters::persistence::JsonLedgerStore;
use usecases::{ReconcileMode, ReconciliationEngine};

const USAGE: &str = "usage: ataix-recon-bot <escalate|spawn-sell|settle-profit> [config.toml]";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. CLI: mode + optional config path ─────────────────
    let mut args = std::env::args().skip(1);
    let mode: ReconcileMode = args.next().context(USAGE)?.parse()?;
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());

    // ── 2. Load configuration ───────────────────────────────
    let config = config::loader::load_config(&config_path)
        .context("Failed to load configuration")?;

    // ── 3. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.bot.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        mode = %mode,
        "Starting ATAIX reconciliation bot"
    );

    // ── 4. Load API key from env ────────────────────────────
    let credentials =
        ApiCredentials::from_env().context("Failed to load ATAIX credentials from env")?;

    // ── 5. Create exchange client with auth + spacing ───────
    let client_config = AtaixClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: Duration::from_secs(config.api.timeout_seconds),
        max_retries: config.api.max_retries,
        retry_base_delay: Duration::from_millis(200),
        min_request_interval: Duration::from_millis(config.rate_limits.min_interval_ms),
    };
    let client = Arc::new(
        AtaixClient::new(credentials, client_config).context("Failed to create ATAIX client")?,
    );

    // ── 6. Wire ports and engine ────────────────────────────
    let exchange = Arc::new(AtaixExchange::new(Arc::clone(&client)));
    let store = Arc::new(JsonLedgerStore::new(&config.ledger.path));
    let engine = ReconciliationEngine::new(exchange, store, &config.policy);

    // ── 7. Run the pass; SIGINT cuts it short cleanly ───────
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    let summary = engine.run_pass(mode, &mut shutdown_rx).await?;

    info!(
        scanned = summary.scanned,
        updated = summary.updated,
        replaced = summary.replaced,
        spawned = summary.spawned,
        profited = summary.profited,
        skipped = summary.skipped,
        failed = summary.failed,
        interrupted = summary.interrupted,
        "Pass complete"
    );
    Ok(())
}
