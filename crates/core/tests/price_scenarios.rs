//! End-to-end scenarios for the price engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pricing_core::price::{
    BinaryCodec, CHARGE_TYPE_MAIN, Charge, Charges, Price, PriceError, RoundingMode,
};

fn eur(amount: Decimal) -> Price {
    Price::from_decimal(amount, "EUR")
}

#[test]
fn minor_units_match_float_factory() {
    assert_eq!(
        Price::from_minor_units(245, 100, "EUR").get_payable(),
        Price::from_float(2.45, "EUR")
    );
}

#[test]
fn half_up_and_floor_differ_on_midpoint() {
    let price = Price::from_float(1.115, "EUR");
    assert_eq!(
        price.payable_by_rounding_mode(RoundingMode::HalfUp, 100),
        eur(dec!(1.12))
    );
    assert_eq!(
        price.payable_by_rounding_mode(RoundingMode::Floor, 100),
        eur(dec!(1.11))
    );
}

#[test]
fn negative_midpoint_is_truncated_except_under_floor() {
    let price = Price::from_float(-1.115, "EUR");
    assert_eq!(
        price.payable_by_rounding_mode(RoundingMode::HalfUp, 100),
        eur(dec!(-1.11))
    );
    assert_eq!(
        price.payable_by_rounding_mode(RoundingMode::Ceil, 100),
        eur(dec!(-1.11))
    );
    assert_eq!(
        price.payable_by_rounding_mode(RoundingMode::Floor, 100),
        eur(dec!(-1.12))
    );
}

#[test]
fn installments_reproduce_payable_total() {
    let price = Price::from_float(12.456, "EUR");
    let parts = price.split_in_payables(6).unwrap();

    let amounts: Vec<Decimal> = parts.iter().map(Price::amount).collect();
    assert_eq!(
        amounts,
        vec![dec!(2.08), dec!(2.08), dec!(2.08), dec!(2.08), dec!(2.07), dec!(2.07)]
    );
    let sum = Price::sum_all(&parts).unwrap();
    assert_eq!(sum, eur(dec!(12.46)));
    assert_eq!(sum, price.get_payable());
}

#[test]
fn repeated_main_charges_accumulate_rounded() {
    let mut charges = Charges::default();
    let charge = Charge::main(eur(dec!(5.00)), eur(dec!(5.00)));
    charges.add_charge(charge.clone()).unwrap();
    charges.add_charge(charge).unwrap();

    let main = charges.get_by_type(CHARGE_TYPE_MAIN).unwrap();
    assert_eq!(main.price, eur(dec!(10.00)));
    assert!(main.price.is_payable());
}

#[test]
fn adding_across_currencies_fails_with_zero_fallback() {
    let err = Price::from_float(5.0, "EUR")
        .add(&Price::from_float(5.0, "USD"))
        .unwrap_err();
    assert!(matches!(err, PriceError::CurrencyMismatch { .. }));
    assert_eq!(err.fallback_price(), Some(Price::zero("EUR")));
}

#[test]
fn order_total_with_tax_and_voucher() {
    let net = eur(dec!(19.99)).multiply(3);
    let gross = net.taxed(dec!(19));
    let voucher = eur(dec!(10)).inverse();

    let mut total: Charges = [Charge::main(gross.clone(), gross)].into_iter().collect();
    total
        .add_charge(Charge::new(voucher.clone(), voucher, "voucher"))
        .unwrap();
    total.add_charge(Charge::new(eur(dec!(4.9)), eur(dec!(4.9)), "shipping")).unwrap();

    let prices: Vec<Price> = total.iter().map(|(_, c)| c.price.clone()).collect();
    let grand_total = Price::sum_all(&prices).unwrap().get_payable();
    // 59.97 * 1.19 = 71.3643, -10, +4.90
    assert_eq!(grand_total, eur(dec!(66.26)));

    let restored = Charges::decode(&total.encode().unwrap()).unwrap();
    assert_eq!(restored, total);
}
