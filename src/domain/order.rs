//! Core order-ledger domain types.
//!
//! Defines the unit of the persisted ledger (`OrderRecord`) and the
//! specification for orders the bot places itself (`OrderSpec`).
//! Serde names mirror the exchange's JSON field names (`orderID`,
//! `cumQuoteQuantity`, ...) so the ledger file round-trips the wire
//! representation unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of fractional digits in an exchange price tick.
pub const PRICE_SCALE: u32 = 4;

/// Round a price to the exchange tick and pad it to a fixed scale,
/// so serialized prices always read like `"101.0000"`.
///
/// Uses half-to-even midpoint rounding, matching the exchange's
/// price-tick expectations.
pub fn quantize_price(price: Decimal) -> Decimal {
    let mut quantized = price.round_dp(PRICE_SCALE);
    quantized.rescale(PRICE_SCALE);
    quantized
}

/// Order side — `"buy"` or `"sell"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Order type. Only limit orders are ever produced by this bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    #[default]
    Limit,
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit => write!(f, "limit"),
        }
    }
}

/// Local cached view of an order's exchange state.
///
/// May be stale between reconciliation passes; a pass refreshes it
/// from the remote API. Statuses the exchange reports that we do not
/// model (e.g. partial fills) collapse to `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Filled,
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Parse a remote status string, case-insensitively.
    pub fn from_wire(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("new") {
            Self::New
        } else if raw.eq_ignore_ascii_case("filled") {
            Self::Filled
        } else if raw.eq_ignore_ascii_case("cancelled") || raw.eq_ignore_ascii_case("canceled") {
            Self::Cancelled
        } else {
            Self::Unknown
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Filled => write!(f, "filled"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Realized profit attached to a filled sell record.
///
/// Computed once from the buy/sell settlement fields and never
/// recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profit {
    /// Net profit in quote currency, 4 decimal places.
    pub usdt: Decimal,
    /// Net profit relative to total cost, 2 decimal places.
    pub percent: Decimal,
}

impl Profit {
    pub const ZERO: Self = Self {
        usdt: Decimal::ZERO,
        percent: Decimal::ZERO,
    };
}

/// A single entry of the persisted order ledger.
///
/// Identity is the exchange-assigned `orderID`; records are mutated in
/// place for status/settlement updates and never deleted, so cancelled
/// and filled entries remain for audit and profit linkage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Exchange-assigned identifier, immutable once set. A record with
    /// an empty ID is malformed and skipped by every pass.
    #[serde(rename = "orderID", default)]
    pub order_id: String,
    /// Trading pair, e.g. `"ETHUSDT"`.
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type", default)]
    pub order_type: OrderKind,
    /// Limit price at placement.
    pub price: Decimal,
    pub quantity: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    /// Back-reference from a sell record to the buy that spawned it.
    /// Non-owning, lookup only.
    #[serde(rename = "relatedOrderID", default, skip_serializing_if = "Option::is_none")]
    pub related_order_id: Option<String>,
    /// Cumulative quote quantity, kept as the raw string the exchange
    /// reported so malformed values surface at profit time, not here.
    #[serde(rename = "cumQuoteQuantity", default, skip_serializing_if = "Option::is_none")]
    pub cum_quote_quantity: Option<String>,
    #[serde(rename = "cumCommission", default, skip_serializing_if = "Option::is_none")]
    pub cum_commission: Option<String>,
    /// Set at most once, on a filled sell with a resolvable buy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<Profit>,
    /// Placement time for records this bot created itself; pre-seeded
    /// records have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Specification of an order to place on the exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderKind,
    pub quantity: Decimal,
    pub price: Decimal,
}

impl OrderSpec {
    /// Build a limit order spec with a tick-quantized price.
    pub fn limit(symbol: String, side: Side, quantity: Decimal, price: Decimal) -> Self {
        Self {
            symbol,
            side,
            order_type: OrderKind::Limit,
            quantity,
            price: quantize_price(price),
        }
    }

    /// Turn an accepted placement into a fresh ledger record.
    pub fn into_record(self, order_id: String) -> OrderRecord {
        OrderRecord {
            order_id,
            symbol: self.symbol,
            side: self.side,
            order_type: self.order_type,
            price: self.price,
            quantity: self.quantity,
            status: OrderStatus::New,
            related_order_id: None,
            cum_quote_quantity: None,
            cum_commission: None,
            profit: None,
            created_at: Some(Utc::now()),
        }
    }
}
