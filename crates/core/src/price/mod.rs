//! Exact price arithmetic.
//!
//! This module implements the price engine:
//! - `Price` values with currency-safe arithmetic and comparisons
//! - Payable rounding per currency
//! - Splitting into payable parts with an exact sum
//! - `Charge` and `Charges` for composite totals
//! - Byte encoding for persistence

pub mod charge;
pub mod charges;
pub mod codec;
pub mod error;
#[allow(clippy::module_inception)]
pub mod price;
pub mod rounding;
pub mod split;

#[cfg(test)]
mod props;

/// The exact decimal amount of a price.
pub type DecimalAmount = rust_decimal::Decimal;

pub use charge::{CHARGE_TYPE_MAIN, Charge};
pub use charges::Charges;
pub use codec::BinaryCodec;
pub use error::PriceError;
pub use price::Price;
pub use rounding::{Rounded, RoundingMode, RoundingPolicy};
