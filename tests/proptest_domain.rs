//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify that the pricing policies and the profit
//! calculator maintain their invariants across random inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;

use ataix_recon_bot::domain::escalation::EscalationPolicy;
use ataix_recon_bot::domain::order::quantize_price;
use ataix_recon_bot::domain::profit::{ProfitCalculator, Settlement};
use ataix_recon_bot::domain::spawn::SellSpawnPolicy;

// ── Price quantization ──────────────────────────────────────

proptest! {
    /// Quantizing twice is the same as quantizing once.
    #[test]
    fn quantize_is_idempotent(ticks in 0i64..1_000_000_000) {
        let price = Decimal::new(ticks, 6);
        let once = quantize_price(price);
        prop_assert_eq!(once, quantize_price(once));
    }

    /// Quantized prices always carry exactly four fractional digits.
    #[test]
    fn quantize_fixes_scale(ticks in 0i64..1_000_000_000) {
        let price = Decimal::new(ticks, 2);
        prop_assert_eq!(quantize_price(price).scale(), 4);
    }
}

// ── Escalation policy ───────────────────────────────────────

proptest! {
    /// A replacement price never drops below the original.
    #[test]
    fn replacement_never_below_original(ticks in 1i64..100_000_000) {
        let price = Decimal::new(ticks, 4);
        let policy = EscalationPolicy::default();
        let replacement = policy.replacement_price(price);
        prop_assert!(
            replacement >= price,
            "replacement {replacement} below original {price}"
        );
    }

    /// Escalation stays within one tick of the exact 1% step.
    #[test]
    fn replacement_tracks_exact_step(ticks in 1i64..100_000_000) {
        let price = Decimal::new(ticks, 4);
        let policy = EscalationPolicy::default();
        let replacement = policy.replacement_price(price);
        let exact = price * Decimal::new(101, 2);
        let tick = Decimal::new(1, 4);
        prop_assert!((replacement - exact).abs() <= tick);
    }
}

// ── Sell spawn policy ───────────────────────────────────────

proptest! {
    /// The spawned sell keeps symbol and quantity, and never prices
    /// below the buy.
    #[test]
    fn sell_spec_preserves_quantity_and_marks_up(
        price_ticks in 1i64..100_000_000,
        quantity_ticks in 1i64..10_000_000,
    ) {
        let price = Decimal::new(price_ticks, 4);
        let quantity = Decimal::new(quantity_ticks, 2);
        let policy = SellSpawnPolicy::default();
        let spec = policy.sell_spec("TRXUSDT".to_string(), quantity, price);
        prop_assert_eq!(spec.quantity, quantity);
        prop_assert!(spec.price >= price);
    }
}

// ── Profit calculator ───────────────────────────────────────

proptest! {
    /// Arbitrary junk settlement strings never panic; they produce
    /// some profit value (zero when unparseable).
    #[test]
    fn profit_never_panics_on_arbitrary_input(
        a in ".{0,12}",
        b in ".{0,12}",
        c in ".{0,12}",
        d in ".{0,12}",
    ) {
        let calc = ProfitCalculator::new();
        let _ = calc.compute(
            Settlement { cum_quote_quantity: Some(&a), cum_commission: Some(&b) },
            Settlement { cum_quote_quantity: Some(&c), cum_commission: Some(&d) },
        );
    }

    /// Zero total cost yields the revenue as profit and a zero
    /// percentage, never a division error.
    #[test]
    fn profit_zero_cost_guard(revenue_ticks in 0i64..10_000_000) {
        let revenue = Decimal::new(revenue_ticks, 4).to_string();
        let calc = ProfitCalculator::new();
        let profit = calc.compute(
            Settlement { cum_quote_quantity: Some("0"), cum_commission: Some("0") },
            Settlement { cum_quote_quantity: Some(&revenue), cum_commission: Some("0") },
        );
        prop_assert_eq!(profit.usdt, Decimal::new(revenue_ticks, 4).round_dp(4));
        prop_assert_eq!(profit.percent, Decimal::ZERO);
    }

    /// Profit is the rounded difference between revenue and cost.
    #[test]
    fn profit_matches_revenue_minus_cost(
        buy_quote in 0i64..10_000_000,
        buy_fee in 0i64..100_000,
        sell_quote in 0i64..10_000_000,
        sell_fee in 0i64..100_000,
    ) {
        let bq = Decimal::new(buy_quote, 4);
        let bf = Decimal::new(buy_fee, 4);
        let sq = Decimal::new(sell_quote, 4);
        let sf = Decimal::new(sell_fee, 4);
        let calc = ProfitCalculator::new();
        let profit = calc.compute(
            Settlement {
                cum_quote_quantity: Some(&bq.to_string()),
                cum_commission: Some(&bf.to_string()),
            },
            Settlement {
                cum_quote_quantity: Some(&sq.to_string()),
                cum_commission: Some(&sf.to_string()),
            },
        );
        prop_assert_eq!(profit.usdt, ((sq - sf) - (bq + bf)).round_dp(4));
    }
}
