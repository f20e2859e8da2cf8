//! Immutable price value with exact decimal arithmetic.
//!
//! CRITICAL: amounts are `rust_decimal::Decimal`, never floats. The only float
//! in this module is the display-only [`Price::float_amount`] and the
//! [`Price::from_float`] convenience factory.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::DecimalAmount;
use super::error::PriceError;
use super::rounding::{self, Rounded, RoundingMode, RoundingPolicy};

/// Tolerance used by [`Price::likely_equal`].
const LIKELY_EQUAL_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 9);

/// An exact amount tagged with a currency code.
///
/// Every operation returns a new `Price`; nothing mutates `self`.
/// Equality is numeric on the amount (`1.0 == 1.00`) and exact on the currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    #[serde(with = "rust_decimal::serde::str")]
    amount: DecimalAmount,
    currency: String,
}

impl Price {
    /// Creates a price from an exact decimal amount.
    #[must_use]
    pub fn from_decimal(amount: DecimalAmount, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Creates a price from a float, keeping the shortest decimal that
    /// represents it (`2.45` becomes exactly `2.45`).
    ///
    /// Non-finite input yields a zero price.
    #[must_use]
    pub fn from_float(amount: f64, currency: impl Into<String>) -> Self {
        let currency = currency.into();
        match Decimal::from_f64(amount) {
            Some(amount) => Self { amount, currency },
            None => {
                warn!(amount, currency = %currency, "Non-representable float amount, using zero");
                Self::zero(currency)
            }
        }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: impl Into<String>) -> Self {
        Self::from_decimal(Decimal::ZERO, currency)
    }

    /// Creates a price from minor units, e.g. `from_minor_units(245, 100, "EUR")`
    /// is 2.45 EUR. A precision of zero yields a zero price.
    #[must_use]
    pub fn from_minor_units(amount: i64, precision: u32, currency: impl Into<String>) -> Self {
        if precision == 0 {
            return Self::zero(currency);
        }
        Self::from_decimal(Decimal::from(amount) / Decimal::from(precision), currency)
    }

    /// The exact amount.
    #[must_use]
    pub const fn amount(&self) -> DecimalAmount {
        self.amount
    }

    /// The currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The amount as a float. Lossy; for display only.
    #[must_use]
    pub fn float_amount(&self) -> f64 {
        self.amount.to_f64().unwrap_or_default()
    }

    /// Resolves the currency of a combination with `other`.
    ///
    /// A zero-valued operand adopts the currency of the other one.
    fn currency_guard(&self, other: &Self) -> Result<String, PriceError> {
        if self.currency == other.currency || self.is_zero() {
            return Ok(other.currency.clone());
        }
        if other.is_zero() {
            return Ok(self.currency.clone());
        }
        Err(PriceError::CurrencyMismatch {
            expected: self.currency.clone(),
            got: other.currency.clone(),
        })
    }

    /// Adds `other`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if both are non-zero and the
    /// currencies differ, and [`PriceError::ArithmeticOverflow`] if the sum
    /// leaves the decimal range.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Result<Self, PriceError> {
        let currency = self.currency_guard(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| overflow("add", &currency))?;
        Ok(Self::from_decimal(amount, currency))
    }

    /// Adds `other`, returning `self` unchanged if the currencies clash.
    #[must_use]
    pub fn force_add(&self, other: &Self) -> Self {
        self.add(other).unwrap_or_else(|_| self.clone())
    }

    /// Subtracts `other`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::CurrencyMismatch`] if both are non-zero and the
    /// currencies differ, and [`PriceError::ArithmeticOverflow`] if the
    /// difference leaves the decimal range.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, other: &Self) -> Result<Self, PriceError> {
        let currency = self.currency_guard(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| overflow("sub", &currency))?;
        Ok(Self::from_decimal(amount, currency))
    }

    /// Reduces the price by `percent` percent.
    ///
    /// Results outside the decimal range yield zero.
    #[must_use]
    pub fn discounted(&self, percent: Decimal) -> Self {
        let hundred = Decimal::ONE_HUNDRED;
        let amount = hundred
            .checked_sub(percent)
            .and_then(|share| self.amount.checked_mul(share))
            .and_then(|amount| amount.checked_div(hundred));
        self.with_checked_amount(amount, "discounted")
    }

    /// Adds `percent` percent tax, assuming the price is net.
    ///
    /// Results outside the decimal range yield zero.
    #[must_use]
    pub fn taxed(&self, percent: Decimal) -> Self {
        let amount = self
            .net_tax(percent)
            .and_then(|tax| self.amount.checked_add(tax));
        self.with_checked_amount(amount, "taxed")
    }

    /// The tax amount, assuming the price is net (100%).
    ///
    /// Results outside the decimal range yield zero.
    #[must_use]
    pub fn tax_from_net(&self, percent: Decimal) -> Self {
        self.with_checked_amount(self.net_tax(percent), "tax_from_net")
    }

    /// The tax amount, assuming the price is gross (100% + `percent`).
    ///
    /// A gross base of zero (`percent == -100`) and results outside the
    /// decimal range yield zero.
    #[must_use]
    pub fn tax_from_gross(&self, percent: Decimal) -> Self {
        let amount = Decimal::ONE_HUNDRED
            .checked_add(percent)
            .and_then(|gross| {
                self.amount
                    .checked_mul(percent)
                    .and_then(|amount| amount.checked_div(gross))
            });
        self.with_checked_amount(amount, "tax_from_gross")
    }

    fn net_tax(&self, percent: Decimal) -> Option<Decimal> {
        self.amount
            .checked_mul(percent)
            .and_then(|amount| amount.checked_div(Decimal::ONE_HUNDRED))
    }

    /// The price multiplied by -1.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.with_amount(-self.amount)
    }

    /// The price multiplied by `qty`. Results outside the decimal range
    /// yield zero.
    #[must_use]
    pub fn multiply(&self, qty: i64) -> Self {
        self.with_checked_amount(self.amount.checked_mul(Decimal::from(qty)), "multiply")
    }

    /// The price divided by `qty`. Division by zero yields zero.
    #[must_use]
    pub fn divided(&self, qty: i64) -> Self {
        if qty == 0 {
            debug!(price = %self, "Division by zero, returning zero price");
            return Self::zero(self.currency.clone());
        }
        self.with_checked_amount(self.amount.checked_div(Decimal::from(qty)), "divided")
    }

    /// Exact comparison of amount and currency.
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Same currency and amounts closer than `1e-9`.
    #[must_use]
    pub fn likely_equal(&self, other: &Self) -> bool {
        self.currency == other.currency
            && self
                .amount
                .checked_sub(other.amount)
                .is_some_and(|delta| delta.abs() < LIKELY_EQUAL_TOLERANCE)
    }

    /// True if both share a currency and `self` is smaller.
    #[must_use]
    pub fn is_less_than(&self, other: &Self) -> bool {
        self < other
    }

    /// True if both share a currency and `self` is larger.
    #[must_use]
    pub fn is_greater_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Compares the amount with a raw value, ignoring the currency.
    #[must_use]
    pub fn is_less_than_value(&self, amount: Decimal) -> bool {
        self.amount < amount
    }

    /// Compares the amount with a raw value, ignoring the currency.
    #[must_use]
    pub fn is_greater_than_value(&self, amount: Decimal) -> bool {
        self.amount > amount
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.is_less_than_value(Decimal::ZERO)
    }

    /// Returns true if the amount is above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.is_greater_than_value(Decimal::ZERO)
    }

    /// The rounding policy of this price's currency.
    #[must_use]
    pub fn rounding_policy(&self) -> RoundingPolicy {
        RoundingPolicy::for_currency(&self.currency)
    }

    /// Rounds to the precision payable in this currency, e.g. 1.23344 EUR
    /// becomes 1.23 EUR.
    #[must_use]
    pub fn get_payable(&self) -> Self {
        let policy = self.rounding_policy();
        self.payable_by_rounding_mode(policy.mode, policy.precision)
    }

    /// Rounds with an explicit mode and precision (minor units per unit).
    ///
    /// - 1.115 → 1.12 (`HalfUp`) / 1.11 (`Floor`)
    /// - -1.115 → -1.11 (`HalfUp`) / -1.12 (`Floor`)
    ///
    /// Amounts too large to be scaled into minor units are returned unrounded.
    #[must_use]
    pub fn payable_by_rounding_mode(&self, mode: RoundingMode, precision: u32) -> Self {
        self.payable_by_rounding_mode_checked(mode, precision).price
    }

    /// Like [`Price::payable_by_rounding_mode`], but reports whether the
    /// unrounded fallback was used.
    #[must_use]
    pub fn payable_by_rounding_mode_checked(&self, mode: RoundingMode, precision: u32) -> Rounded {
        match rounding::round_amount(self.amount, mode, precision) {
            Some(amount) => Rounded {
                price: self.with_amount(amount),
                overflowed: false,
            },
            None => {
                warn!(price = %self, %mode, precision, "Amount cannot be rounded, returning it unrounded");
                Rounded {
                    price: self.clone(),
                    overflowed: true,
                }
            }
        }
    }

    /// Returns true if the price is already payable.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        self.get_payable() == *self
    }

    /// Sums all prices left to right.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::EmptyInput`] for an empty slice and
    /// the error of the first failing addition.
    pub fn sum_all(prices: &[Self]) -> Result<Self, PriceError> {
        let (first, rest) = prices.split_first().ok_or(PriceError::EmptyInput)?;
        rest.iter().try_fold(first.clone(), |sum, price| sum.add(price))
    }

    fn with_amount(&self, amount: Decimal) -> Self {
        Self::from_decimal(amount, self.currency.clone())
    }

    /// `amount` in this currency, or zero if the computation left the
    /// decimal range.
    fn with_checked_amount(&self, amount: Option<Decimal>, operation: &'static str) -> Self {
        match amount {
            Some(amount) => self.with_amount(amount),
            None => {
                warn!(price = %self, operation, "Result out of range, returning zero price");
                Self::zero(self.currency.clone())
            }
        }
    }
}

fn overflow(operation: &'static str, currency: &str) -> PriceError {
    PriceError::ArithmeticOverflow {
        operation,
        currency: currency.to_string(),
    }
}

impl PartialOrd for Price {
    /// Prices in different currencies are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency {
            Some(self.amount.cmp(&other.amount))
        } else {
            None
        }
    }
}

impl Neg for Price {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.inverse()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
