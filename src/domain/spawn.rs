//! Sell spawn policy — derives the linked sell order from a buy fill.
//!
//! Once a buy order fills, the bot immediately offers the acquired
//! quantity back at a fixed markup. The quantity is carried through
//! from the buy unchanged (no partial-quantity splitting).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::order::{quantize_price, OrderSpec, Side};

/// Builds sell order specs for filled buys. Pure, no I/O.
#[derive(Debug, Clone)]
pub struct SellSpawnPolicy {
    /// Multiplier applied to the buy price, e.g. 1.02 for a 2% markup.
    factor: Decimal,
}

impl SellSpawnPolicy {
    /// Create a policy with the given markup, in percent.
    pub fn new(markup_pct: Decimal) -> Self {
        Self {
            factor: Decimal::ONE + markup_pct / dec!(100),
        }
    }

    /// Sell spec for a filled buy: same symbol and quantity, limit
    /// price `round(buy_price * factor, 4)`.
    pub fn sell_spec(&self, symbol: String, quantity: Decimal, buy_price: Decimal) -> OrderSpec {
        OrderSpec::limit(symbol, Side::Sell, quantity, quantize_price(buy_price * self.factor))
    }
}

impl Default for SellSpawnPolicy {
    fn default() -> Self {
        Self::new(dec!(2))
    }
}
