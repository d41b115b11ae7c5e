//! Price escalation policy for stale buy orders.
//!
//! When a buy order sits unfilled on the book, the reconciliation
//! engine cancels it and re-places it at a slightly higher limit
//! price. This policy computes that replacement price: a fixed
//! percentage step above the original, quantized to the exchange's
//! 4-digit price tick.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::order::quantize_price;

/// Computes replacement prices for stale buy orders. Pure, no I/O.
#[derive(Debug, Clone)]
pub struct EscalationPolicy {
    /// Multiplier applied to the original price, e.g. 1.01 for a 1% step.
    factor: Decimal,
}

impl EscalationPolicy {
    /// Create a policy with the given step, in percent.
    pub fn new(step_pct: Decimal) -> Self {
        Self {
            factor: Decimal::ONE + step_pct / dec!(100),
        }
    }

    /// Price for the replacement order: `round(original * factor, 4)`.
    pub fn replacement_price(&self, original: Decimal) -> Decimal {
        quantize_price(original * self.factor)
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(dec!(1))
    }
}
