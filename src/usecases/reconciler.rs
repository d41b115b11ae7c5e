//! Reconciliation Engine - Order Lifecycle Reconciliation
//!
//! One pass walks the persisted ledger, queries the exchange for each
//! eligible record, applies the mode's decision table, and persists
//! the mutated ledger exactly once at the end. The same engine serves
//! all three modes, parameterized by their selection predicate and
//! action policy:
//! - `Escalate`: confirm fills, or cancel stale buys and re-place at a
//!   higher price
//! - `SpawnSell`: place the linked sell once a buy fills
//! - `SettleProfit`: refresh sell settlement state and record realized
//!   profit
//!
//! Failure policy: nothing in a pass is fatal. A failed remote call
//! leaves the record untouched for the next invocation; mutations are
//! only applied after the corresponding remote side effect has been
//! verified.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

use crate::config::PolicyConfig;
use crate::domain::escalation::EscalationPolicy;
use crate::domain::order::{OrderRecord, OrderSpec, OrderStatus, Side};
use crate::domain::profit::{ProfitCalculator, Settlement};
use crate::domain::spawn::SellSpawnPolicy;
use crate::ports::exchange::ExchangeClient;
use crate::ports::store::OrderStore;

/// Which decision table a pass applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Cancel stale buys and replace them at an escalated price.
    Escalate,
    /// Spawn the linked sell order for buys that filled.
    SpawnSell,
    /// Refresh sell state and record realized profit.
    SettleProfit,
}

impl ReconcileMode {
    /// Selection predicate: does this record need attention under this
    /// mode?
    fn selects(self, record: &OrderRecord) -> bool {
        match self {
            Self::Escalate | Self::SpawnSell => {
                record.side == Side::Buy && record.status == OrderStatus::New
            }
            // Sells are re-queried every pass regardless of cached
            // status; settlement fields can change while status stays
            // the same.
            Self::SettleProfit => record.side == Side::Sell,
        }
    }
}

impl FromStr for ReconcileMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "escalate" => Ok(Self::Escalate),
            "spawn-sell" => Ok(Self::SpawnSell),
            "settle-profit" => Ok(Self::SettleProfit),
            other => anyhow::bail!(
                "unknown mode '{other}', expected escalate | spawn-sell | settle-profit"
            ),
        }
    }
}

impl std::fmt::Display for ReconcileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Escalate => write!(f, "escalate"),
            Self::SpawnSell => write!(f, "spawn-sell"),
            Self::SettleProfit => write!(f, "settle-profit"),
        }
    }
}

/// Counters from one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Records that were selected and queried.
    pub scanned: usize,
    /// Records whose local status was brought up to date.
    pub updated: usize,
    /// Replacement buy orders appended (escalate mode).
    pub replaced: usize,
    /// Sell orders spawned (spawn-sell mode).
    pub spawned: usize,
    /// Profit results attached (settle-profit mode).
    pub profited: usize,
    /// Records skipped this pass (remote failure, missing data); they
    /// retry on the next invocation.
    pub skipped: usize,
    /// Verified remote actions whose follow-up placement failed.
    pub failed: usize,
    /// True when the pass stopped early on a shutdown signal.
    pub interrupted: bool,
}

/// The reconciliation engine, generic over its two ports.
pub struct ReconciliationEngine<E, S> {
    exchange: Arc<E>,
    store: Arc<S>,
    escalation: EscalationPolicy,
    spawn_policy: SellSpawnPolicy,
    profit: ProfitCalculator,
}

impl<E: ExchangeClient, S: OrderStore> ReconciliationEngine<E, S> {
    pub fn new(exchange: Arc<E>, store: Arc<S>, policy: &PolicyConfig) -> Self {
        Self {
            exchange,
            store,
            escalation: EscalationPolicy::new(policy.escalation_step_pct),
            spawn_policy: SellSpawnPolicy::new(policy.sell_markup_pct),
            profit: ProfitCalculator::new(),
        }
    }

    /// Run one full pass over the ledger under the given mode.
    ///
    /// The ledger is loaded once, walked strictly sequentially, and
    /// persisted exactly once at the end — also when the pass is cut
    /// short by a shutdown signal, so whatever was safely decided
    /// before the signal is never lost.
    #[instrument(skip(self, shutdown), fields(mode = %mode))]
    pub async fn run_pass(
        &self,
        mode: ReconcileMode,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<PassSummary> {
        let mut ledger = self
            .store
            .load()
            .await
            .context("Failed to load order ledger")?;
        let mut summary = PassSummary::default();
        let mut appended: Vec<OrderRecord> = Vec::new();

        info!(records = ledger.len(), "Reconciliation pass started");

        for idx in 0..ledger.len() {
            if shutdown.try_recv().is_ok() {
                warn!(
                    scanned = summary.scanned,
                    "Shutdown requested, ending pass early"
                );
                summary.interrupted = true;
                break;
            }

            if !mode.selects(&ledger[idx]) {
                continue;
            }
            if ledger[idx].order_id.is_empty() {
                warn!(symbol = %ledger[idx].symbol, "Skipping record without orderID");
                summary.skipped += 1;
                continue;
            }
            summary.scanned += 1;

            match mode {
                ReconcileMode::Escalate => {
                    self.escalate(&mut ledger, idx, &mut appended, &mut summary)
                        .await;
                }
                ReconcileMode::SpawnSell => {
                    self.spawn_sell(&mut ledger, idx, &mut appended, &mut summary)
                        .await;
                }
                ReconcileMode::SettleProfit => {
                    self.settle(&mut ledger, idx, &mut summary).await;
                }
            }
        }

        ledger.extend(appended);
        self.store
            .save(&ledger)
            .await
            .context("Failed to persist order ledger")?;

        info!(
            scanned = summary.scanned,
            updated = summary.updated,
            replaced = summary.replaced,
            spawned = summary.spawned,
            profited = summary.profited,
            skipped = summary.skipped,
            failed = summary.failed,
            "Reconciliation pass finished"
        );
        Ok(summary)
    }

    /// Escalate mode: confirm the fill, or cancel-and-replace at a
    /// higher limit price.
    async fn escalate(
        &self,
        ledger: &mut [OrderRecord],
        idx: usize,
        appended: &mut Vec<OrderRecord>,
        summary: &mut PassSummary,
    ) {
        let order_id = ledger[idx].order_id.clone();
        debug!(order_id = %order_id, "Checking buy order");

        let view = match self.exchange.get_order(&order_id).await {
            Ok(view) => view,
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Status query failed, will retry next pass");
                summary.skipped += 1;
                return;
            }
        };
        let Some(status) = view.status else {
            warn!(order_id = %order_id, "Remote response carried no status, will retry next pass");
            summary.skipped += 1;
            return;
        };

        if status == OrderStatus::Filled {
            ledger[idx].status = OrderStatus::Filled;
            summary.updated += 1;
            info!(order_id = %order_id, "Buy order filled");
            return;
        }

        match self.exchange.cancel_order(&order_id).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(order_id = %order_id, "Cancellation rejected, leaving order open");
                summary.skipped += 1;
                return;
            }
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Cancellation failed, will retry next pass");
                summary.skipped += 1;
                return;
            }
        }

        // The remote cancel is verified: mirror it locally before
        // attempting the replacement, so the ledger never claims an
        // open order the exchange no longer has.
        ledger[idx].status = OrderStatus::Cancelled;

        let spec = OrderSpec::limit(
            ledger[idx].symbol.clone(),
            Side::Buy,
            ledger[idx].quantity,
            self.escalation.replacement_price(ledger[idx].price),
        );
        match self.exchange.place_order(&spec).await {
            Ok(Some(placed)) => {
                info!(
                    old = %order_id,
                    new = %placed.order_id,
                    price = %spec.price,
                    "Replacement order placed"
                );
                appended.push(spec.into_record(placed.order_id));
                summary.replaced += 1;
            }
            Ok(None) => {
                warn!(order_id = %order_id, "Replacement rejected; original stays cancelled");
                summary.failed += 1;
            }
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Replacement placement failed; original stays cancelled");
                summary.failed += 1;
            }
        }
    }

    /// Spawn-sell mode: once the buy filled remotely, place the linked
    /// sell. The fill is only mirrored locally together with the sell
    /// append — a failed placement leaves the buy `new` so the spawn
    /// retries next pass.
    async fn spawn_sell(
        &self,
        ledger: &mut [OrderRecord],
        idx: usize,
        appended: &mut Vec<OrderRecord>,
        summary: &mut PassSummary,
    ) {
        let order_id = ledger[idx].order_id.clone();
        debug!(order_id = %order_id, "Checking buy order");

        let view = match self.exchange.get_order(&order_id).await {
            Ok(view) => view,
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Status query failed, will retry next pass");
                summary.skipped += 1;
                return;
            }
        };
        match view.status {
            Some(OrderStatus::Filled) => {}
            Some(_) => {
                debug!(order_id = %order_id, "Buy order still open");
                return;
            }
            None => {
                warn!(order_id = %order_id, "Remote response carried no status, will retry next pass");
                summary.skipped += 1;
                return;
            }
        }

        let spec = self.spawn_policy.sell_spec(
            ledger[idx].symbol.clone(),
            ledger[idx].quantity,
            ledger[idx].price,
        );
        match self.exchange.place_order(&spec).await {
            Ok(Some(placed)) => {
                info!(
                    buy = %order_id,
                    sell = %placed.order_id,
                    price = %spec.price,
                    "Sell order spawned"
                );
                let mut sell = spec.into_record(placed.order_id);
                sell.related_order_id = Some(order_id);
                appended.push(sell);
                // Commit point: the sell exists remotely, so the fill
                // and the spawn are recorded together.
                ledger[idx].status = OrderStatus::Filled;
                summary.updated += 1;
                summary.spawned += 1;
            }
            Ok(None) => {
                warn!(order_id = %order_id, "Sell placement rejected; buy left new to retry the spawn");
                summary.failed += 1;
            }
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Sell placement failed; buy left new to retry the spawn");
                summary.failed += 1;
            }
        }
    }

    /// Settle-profit mode: refresh the sell's settlement state and,
    /// once it is filled and its buy is resolvable, record realized
    /// profit exactly once.
    async fn settle(&self, ledger: &mut [OrderRecord], idx: usize, summary: &mut PassSummary) {
        let order_id = ledger[idx].order_id.clone();
        debug!(order_id = %order_id, "Checking sell order");

        let view = match self.exchange.get_order(&order_id).await {
            Ok(view) => view,
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "Status query failed, will retry next pass");
                summary.skipped += 1;
                return;
            }
        };

        // Refresh unconditionally; fields absent remotely keep their
        // cached values.
        {
            let record = &mut ledger[idx];
            if let Some(status) = view.status {
                record.status = status;
            }
            if let Some(quote) = view.cum_quote_quantity {
                record.cum_quote_quantity = Some(quote);
            }
            if let Some(commission) = view.cum_commission {
                record.cum_commission = Some(commission);
            }
        }

        if ledger[idx].status != OrderStatus::Filled {
            debug!(order_id = %order_id, status = %ledger[idx].status, "Sell not filled yet");
            return;
        }
        if ledger[idx].profit.is_some() {
            debug!(order_id = %order_id, "Profit already recorded");
            return;
        }
        summary.updated += 1;
        info!(order_id = %order_id, "Sell order filled");

        let Some(related_id) = ledger[idx].related_order_id.clone() else {
            warn!(order_id = %order_id, "Sell has no related buy order, profit skipped");
            return;
        };
        let buy_settlement = ledger
            .iter()
            .find(|record| record.order_id == related_id)
            .and_then(|buy| match (&buy.cum_quote_quantity, &buy.cum_commission) {
                (Some(quote), Some(commission)) => Some((quote.clone(), commission.clone())),
                _ => None,
            });
        let Some((buy_quote, buy_commission)) = buy_settlement else {
            warn!(
                order_id = %order_id,
                related = %related_id,
                "Related buy record missing settlement fields, profit skipped"
            );
            return;
        };

        let record = &mut ledger[idx];
        let profit = self.profit.compute(
            Settlement {
                cum_quote_quantity: Some(&buy_quote),
                cum_commission: Some(&buy_commission),
            },
            Settlement {
                cum_quote_quantity: record.cum_quote_quantity.as_deref(),
                cum_commission: record.cum_commission.as_deref(),
            },
        );
        info!(
            order_id = %order_id,
            usdt = %profit.usdt,
            percent = %profit.percent,
            "Realized profit recorded"
        );
        record.profit = Some(profit);
        summary.profited += 1;
    }
}
