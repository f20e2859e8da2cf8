//! Property-based tests for the price engine.
//!
//! - Property 1: Add/Sub Inverse
//! - Property 2: Split Sum Invariant
//! - Property 3: Payable Idempotence
//! - Property 4: Codec Round Trip
//! - Property 5: Out-of-Range Results

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::codec::BinaryCodec;
use super::price::Price;
use super::rounding::RoundingMode;

/// Strategy to generate signed amounts with up to 6 decimal places.
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy to generate non-negative amounts with up to 6 decimal places.
fn non_negative_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy to generate amounts with more digits than an f64 can hold.
fn wide_amount() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), 0u32..=10).prop_map(|(v, scale)| {
        Decimal::from_i128_with_scale(i128::from(v) * 1_000_000_007, scale)
    })
}

/// Strategy to pick a currency with either rounding policy.
fn currency() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["EUR", "USD", "miles", "POINTS"])
}

/// Strategy to generate split counts (1 to 50).
fn split_count() -> impl Strategy<Value = usize> {
    1usize..=50
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // =========================================================================
    // Property 1: Add/Sub Inverse
    // =========================================================================

    /// *For any* two prices of the same currency, `p + q - q == p`.
    #[test]
    fn prop_add_then_sub_is_identity(
        a in signed_amount(),
        b in signed_amount(),
        currency in currency(),
    ) {
        let p = Price::from_decimal(a, currency);
        let q = Price::from_decimal(b, currency);
        let result = p.add(&q).and_then(|sum| sum.sub(&q)).unwrap();
        prop_assert_eq!(result, p);
    }

    /// *For any* two non-zero prices in different currencies, adding fails
    /// and the fallback is the zero of the left-hand currency.
    #[test]
    fn prop_mismatch_falls_back_to_zero(
        a in signed_amount().prop_filter("non-zero", |a| !a.is_zero()),
        b in signed_amount().prop_filter("non-zero", |b| !b.is_zero()),
    ) {
        let err = Price::from_decimal(a, "EUR")
            .add(&Price::from_decimal(b, "USD"))
            .unwrap_err();
        prop_assert_eq!(err.fallback_price(), Some(Price::zero("EUR")));
    }

    // =========================================================================
    // Property 2: Split Sum Invariant
    // =========================================================================

    /// *For any* amount and count, the parts sum exactly to the payable amount.
    #[test]
    fn prop_split_sums_to_payable(
        amount in signed_amount(),
        currency in currency(),
        count in split_count(),
    ) {
        let price = Price::from_decimal(amount, currency);
        let parts = price.split_in_payables(count).unwrap();
        prop_assert_eq!(parts.len(), count);
        prop_assert_eq!(Price::sum_all(&parts).unwrap(), price.get_payable());
    }

    /// *For any* non-negative amount, parts differ by at most one minor unit
    /// and larger parts come first.
    #[test]
    fn prop_split_parts_are_front_loaded(
        amount in non_negative_amount(),
        count in split_count(),
    ) {
        let parts = Price::from_decimal(amount, "EUR").split_in_payables(count).unwrap();
        let cent = Decimal::new(1, 2);
        for pair in parts.windows(2) {
            let diff = pair[0].amount() - pair[1].amount();
            prop_assert!(diff == Decimal::ZERO || diff == cent);
        }
        prop_assert!(parts.iter().all(Price::is_payable));
    }

    // =========================================================================
    // Property 3: Payable Idempotence
    // =========================================================================

    /// *For any* amount in a half-up currency, rounding twice equals rounding once.
    #[test]
    fn prop_payable_is_idempotent(amount in signed_amount()) {
        let once = Price::from_decimal(amount, "EUR").get_payable();
        prop_assert_eq!(once.get_payable(), once.clone());
        prop_assert!(once.is_payable());
    }

    /// *For any* non-negative loyalty amount, rounding twice equals rounding once.
    ///
    /// Negative loyalty amounts are excluded: floor moves them one unit
    /// further on every call.
    #[test]
    fn prop_loyalty_payable_is_idempotent(amount in non_negative_amount()) {
        let once = Price::from_decimal(amount, "miles").get_payable();
        prop_assert_eq!(once.get_payable(), once.clone());
    }

    /// *For any* non-negative amount, the rounding modes are ordered
    /// floor <= halfdown <= halfup <= ceil.
    #[test]
    fn prop_modes_are_ordered(amount in non_negative_amount()) {
        let price = Price::from_decimal(amount, "EUR");
        let floor = price.payable_by_rounding_mode(RoundingMode::Floor, 100);
        let half_down = price.payable_by_rounding_mode(RoundingMode::HalfDown, 100);
        let half_up = price.payable_by_rounding_mode(RoundingMode::HalfUp, 100);
        let ceil = price.payable_by_rounding_mode(RoundingMode::Ceil, 100);
        prop_assert!(floor <= half_down);
        prop_assert!(half_down <= half_up);
        prop_assert!(half_up <= ceil);
    }

    // =========================================================================
    // Property 4: Codec Round Trip
    // =========================================================================

    /// *For any* representable amount, decoding an encoded price is exact.
    #[test]
    fn prop_codec_round_trip(amount in wide_amount(), currency in currency()) {
        let price = Price::from_decimal(amount, currency);
        let decoded = Price::decode(&price.encode().unwrap()).unwrap();
        prop_assert_eq!(decoded.amount().to_string(), price.amount().to_string());
        prop_assert_eq!(decoded, price);
    }

    // =========================================================================
    // Property 5: Out-of-Range Results
    // =========================================================================

    /// *For any* amount and quantity, `multiply` is either exact or zero.
    #[test]
    fn prop_multiply_is_exact_or_zero(amount in wide_amount(), qty in any::<i64>()) {
        let product = Price::from_decimal(amount, "EUR").multiply(qty);
        match amount.checked_mul(Decimal::from(qty)) {
            Some(expected) => prop_assert_eq!(product.amount(), expected),
            None => prop_assert!(product.is_zero()),
        }
    }
}
