//! Realized profit computation for a filled buy/sell pair.
//!
//! Works on the raw settlement strings the exchange reports. A field
//! that is absent counts as zero; a field that fails to parse yields
//! the zero profit result instead of an error — a bad settlement value
//! must never block the reconciliation pass.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::order::Profit;

/// Borrowed settlement fields of one side of a round trip.
#[derive(Debug, Clone, Copy)]
pub struct Settlement<'a> {
    pub cum_quote_quantity: Option<&'a str>,
    pub cum_commission: Option<&'a str>,
}

/// Computes realized profit from buy/sell settlements. Pure, no I/O.
#[derive(Debug, Clone)]
pub struct ProfitCalculator {
    usdt_scale: u32,
    percent_scale: u32,
}

impl ProfitCalculator {
    pub fn new() -> Self {
        Self {
            usdt_scale: 4,
            percent_scale: 2,
        }
    }

    /// Net profit of a completed round trip.
    ///
    /// `cost = buy.quote + buy.commission`, `revenue = sell.quote -
    /// sell.commission`, `usdt = round(revenue - cost, 4)`, `percent =
    /// round(usdt / cost * 100, 2)`. A zero cost yields `percent = 0`
    /// rather than a division error.
    pub fn compute(&self, buy: Settlement<'_>, sell: Settlement<'_>) -> Profit {
        let parsed = (
            parse_field(buy.cum_quote_quantity),
            parse_field(buy.cum_commission),
            parse_field(sell.cum_quote_quantity),
            parse_field(sell.cum_commission),
        );
        let (Some(buy_quote), Some(buy_fee), Some(sell_quote), Some(sell_fee)) = parsed else {
            return Profit::ZERO;
        };

        let total_cost = buy_quote + buy_fee;
        let total_revenue = sell_quote - sell_fee;
        let usdt = (total_revenue - total_cost).round_dp(self.usdt_scale);
        let percent = if total_cost.is_zero() {
            Decimal::ZERO
        } else {
            (usdt / total_cost * dec!(100)).round_dp(self.percent_scale)
        };

        Profit { usdt, percent }
    }
}

impl Default for ProfitCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Absent fields are zero; malformed fields are `None`, which zeroes
/// the whole result upstream.
fn parse_field(raw: Option<&str>) -> Option<Decimal> {
    match raw {
        None => Some(Decimal::ZERO),
        Some(s) => s.trim().parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settlement<'a>(quote: &'a str, commission: &'a str) -> Settlement<'a> {
        Settlement {
            cum_quote_quantity: Some(quote),
            cum_commission: Some(commission),
        }
    }

    #[test]
    fn test_round_trip_profit() {
        let calc = ProfitCalculator::new();
        let profit = calc.compute(settlement("100", "0.1"), settlement("102", "0.1"));
        assert_eq!(profit.usdt, dec!(1.8));
        assert_eq!(profit.percent, dec!(1.80));
    }

    #[test]
    fn test_loss_is_negative() {
        let calc = ProfitCalculator::new();
        let profit = calc.compute(settlement("100", "0.1"), settlement("99", "0.1"));
        assert_eq!(profit.usdt, dec!(-1.2));
        assert_eq!(profit.percent, dec!(-1.20));
    }

    #[test]
    fn test_zero_cost_guard() {
        let calc = ProfitCalculator::new();
        let profit = calc.compute(settlement("0", "0"), settlement("5", "0"));
        assert_eq!(profit.usdt, dec!(5));
        assert_eq!(profit.percent, Decimal::ZERO);
    }

    #[test]
    fn test_malformed_field_yields_zero_result() {
        let calc = ProfitCalculator::new();
        let profit = calc.compute(settlement("not-a-number", "0.1"), settlement("102", "0.1"));
        assert_eq!(profit, Profit::ZERO);
    }

    #[test]
    fn test_absent_fields_count_as_zero() {
        let calc = ProfitCalculator::new();
        let none = Settlement {
            cum_quote_quantity: None,
            cum_commission: None,
        };
        let profit = calc.compute(none, settlement("3", "0.5"));
        assert_eq!(profit.usdt, dec!(2.5));
        assert_eq!(profit.percent, Decimal::ZERO);
    }

    #[test]
    fn test_percent_rounds_to_two_places() {
        let calc = ProfitCalculator::new();
        // cost = 100.1, usdt = 1.8 → 1.7982...% → 1.80
        let profit = calc.compute(settlement("100", "0.1"), settlement("102", "0.1"));
        assert_eq!(profit.percent, dec!(1.80));
    }
}
