//! A named component of a total.

use serde::{Deserialize, Serialize};

use super::error::PriceError;
use super::price::Price;

/// Default charge type.
pub const CHARGE_TYPE_MAIN: &str = "main";

/// An amount of a certain type, e.g. the main price, shipping or a voucher.
///
/// `price` is what is paid, possibly in a loyalty currency; `value` is the
/// equivalent in the base currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    /// The amount paid.
    pub price: Price,
    /// The value of `price` in another (base) currency.
    pub value: Price,
    /// Distinguishes the charges of a single total.
    #[serde(rename = "type")]
    pub charge_type: String,
}

impl Charge {
    /// Creates a charge.
    #[must_use]
    pub fn new(price: Price, value: Price, charge_type: impl Into<String>) -> Self {
        Self {
            price,
            value,
            charge_type: charge_type.into(),
        }
    }

    /// Creates a charge of type [`CHARGE_TYPE_MAIN`].
    #[must_use]
    pub fn main(price: Price, value: Price) -> Self {
        Self::new(price, value, CHARGE_TYPE_MAIN)
    }

    /// Adds a charge of the same type, summing price and value independently.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::ChargeTypeMismatch`] if the types differ and
    /// the error of the first failing sum otherwise.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Result<Self, PriceError> {
        if self.charge_type != other.charge_type {
            return Err(PriceError::ChargeTypeMismatch {
                expected: self.charge_type.clone(),
                got: other.charge_type.clone(),
            });
        }
        Ok(Self {
            price: self.price.add(&other.price)?,
            value: self.value.add(&other.value)?,
            charge_type: self.charge_type.clone(),
        })
    }

    /// Rounds price and value, each by its own currency.
    #[must_use]
    pub fn get_payable(&self) -> Self {
        Self {
            price: self.price.get_payable(),
            value: self.value.get_payable(),
            charge_type: self.charge_type.clone(),
        }
    }

    /// Multiplies price and value by `qty`.
    #[must_use]
    pub fn mul(&self, qty: i64) -> Self {
        Self {
            price: self.price.multiply(qty),
            value: self.value.multiply(qty),
            charge_type: self.charge_type.clone(),
        }
    }
}
