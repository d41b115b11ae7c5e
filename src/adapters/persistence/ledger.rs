//! Ledger Store - Atomic JSON Order Ledger Persistence
//!
//! Persists the order ledger as a single JSON array file using atomic
//! writes (write to tmp file, then rename), so the file is always
//! either the old or the new version, never a partial write.
//!
//! Missing or unreadable state degrades to an empty ledger: a missing
//! file is the normal first run, while a corrupt file is surfaced with
//! a loud warning before starting fresh.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::domain::order::OrderRecord;
use crate::ports::store::OrderStore;

/// Atomic JSON file store for the order ledger.
pub struct JsonLedgerStore {
    /// Path to the ledger file.
    ledger_path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
}

impl JsonLedgerStore {
    /// Create a store for the given ledger file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let ledger_path = path.as_ref().to_path_buf();
        let mut tmp = OsString::from(ledger_path.as_os_str());
        tmp.push(".tmp");
        Self {
            ledger_path,
            tmp_path: PathBuf::from(tmp),
        }
    }
}

#[async_trait]
impl OrderStore for JsonLedgerStore {
    /// Load the ledger, treating missing or unreadable state as empty.
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Vec<OrderRecord>> {
        if !self.ledger_path.exists() {
            info!(path = %self.ledger_path.display(), "No ledger file found, starting fresh");
            return Ok(Vec::new());
        }

        let raw = match fs::read_to_string(&self.ledger_path).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    path = %self.ledger_path.display(),
                    error = %e,
                    "Ledger file unreadable, starting with an EMPTY ledger"
                );
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<OrderRecord>>(&raw) {
            Ok(records) => {
                info!(records = records.len(), "Ledger loaded");
                Ok(records)
            }
            Err(e) => {
                warn!(
                    path = %self.ledger_path.display(),
                    error = %e,
                    "Ledger file corrupt, starting with an EMPTY ledger"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Save the full ledger atomically (tmp → rename).
    #[instrument(skip(self, ledger))]
    async fn save(&self, ledger: &[OrderRecord]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(ledger).context("Failed to serialize ledger")?;

        if let Some(parent) = self.ledger_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create ledger directory")?;
            }
        }

        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp ledger file")?;

        fs::rename(&self.tmp_path, &self.ledger_path)
            .await
            .context("Failed to rename ledger file")?;

        info!(
            path = %self.ledger_path.display(),
            records = ledger.len(),
            "Ledger saved"
        );

        Ok(())
    }
}
