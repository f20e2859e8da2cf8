//! Payable rounding.
//!
//! Converts an exact amount into the amount that can actually be paid in a
//! currency: scale into minor units, truncate toward zero, then apply the
//! rounding mode by looking at the first dropped digit.
//!
//! Sign handling is deliberately asymmetric:
//! - `Ceil`, `HalfUp` and `HalfDown` only adjust non-negative amounts;
//!   negative amounts keep their truncated value (`-1.115` → `-1.11`).
//! - `Floor` only adjusts negative amounts, always by one minor unit
//!   (`-1.115` → `-1.12`, and also `-1.11` → `-1.12`).

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::price::Price;

/// How the first dropped digit affects the payable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Cut; negative amounts move one minor unit further from zero.
    Floor,
    /// Round up whenever a dropped digit is non-zero.
    Ceil,
    /// Round up on 5 and above. Default for payable amounts.
    HalfUp,
    /// Round up only above 5.
    HalfDown,
    /// Plain truncation toward zero, no adjustment.
    Truncate,
}

impl RoundingMode {
    /// Parses a mode name, mapping unknown names to [`RoundingMode::Truncate`].
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or(Self::Truncate)
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::HalfUp => "halfup",
            Self::HalfDown => "halfdown",
            Self::Truncate => "truncate",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "floor" => Ok(Self::Floor),
            "ceil" => Ok(Self::Ceil),
            "halfup" => Ok(Self::HalfUp),
            "halfdown" => Ok(Self::HalfDown),
            "truncate" => Ok(Self::Truncate),
            _ => Err(format!("Unknown rounding mode: {s}")),
        }
    }
}

/// Rounding mode and precision used to make a currency payable.
///
/// `precision` is the number of minor units per unit, e.g. `100` for cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundingPolicy {
    /// Rounding mode.
    pub mode: RoundingMode,
    /// Minor units per unit.
    pub precision: u32,
}

impl RoundingPolicy {
    /// Policy for regular money: half-up to cents.
    pub const MONEY: Self = Self {
        mode: RoundingMode::HalfUp,
        precision: 100,
    };

    /// Policy for loyalty currencies: whole units, cut.
    pub const LOYALTY: Self = Self {
        mode: RoundingMode::Floor,
        precision: 1,
    };

    /// Looks up the policy of a currency code (case-insensitive).
    #[must_use]
    pub fn for_currency(currency: &str) -> Self {
        if currency.eq_ignore_ascii_case("miles") || currency.eq_ignore_ascii_case("points") {
            Self::LOYALTY
        } else {
            Self::MONEY
        }
    }
}

/// Result of a checked payable rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rounded {
    /// The rounded price, or the unrounded one if `overflowed` is set.
    pub price: Price,
    /// True if the amount could not be scaled into minor units and was
    /// returned unrounded.
    pub overflowed: bool,
}

/// Rounds `amount` to `precision` minor units per unit.
///
/// Returns `None` when the minor unit count would not fit into an `i64`,
/// when scaling leaves the decimal range, or when `precision` is zero.
pub(crate) fn round_amount(amount: Decimal, mode: RoundingMode, precision: u32) -> Option<Decimal> {
    if precision == 0 {
        return None;
    }
    let precision = Decimal::from(precision);
    let scaled = amount.checked_mul(precision)?;
    let mut truncated = scaled.trunc();
    if truncated.to_i64().is_none() {
        return None;
    }

    let negative = amount < Decimal::ZERO;
    let sign = if negative {
        Decimal::NEGATIVE_ONE
    } else {
        Decimal::ONE
    };

    let check = scaled.checked_mul(Decimal::TEN)?.trunc();
    let extra_digit = (check - truncated * Decimal::TEN) * sign;
    let five = Decimal::from(5);

    let adjust = match mode {
        RoundingMode::Ceil => !negative && extra_digit > Decimal::ZERO,
        RoundingMode::HalfUp => !negative && extra_digit >= five,
        RoundingMode::HalfDown => !negative && extra_digit > five,
        RoundingMode::Floor => negative,
        RoundingMode::Truncate => false,
    };
    if adjust {
        truncated += sign;
    }

    truncated.checked_div(precision)
}
