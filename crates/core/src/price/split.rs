//! Splitting a price into payable parts.
//!
//! Splitting 12.456 EUR (payable 12.46) into 6 gives 2.076 per part, but each
//! part has to be payable on its own. Rounding every part to 2.08 or 2.07
//! would lose or invent cents, so the payable total is split in minor units
//! and the remainder is handed out one unit at a time from the front:
//!
//! `2.08 + 2.08 + 2.08 + 2.08 + 2.07 + 2.07 = 12.46`

use rust_decimal::prelude::*;

use super::error::PriceError;
use super::price::Price;

impl Price {
    /// Splits the payable amount into `count` payable parts whose sum is
    /// exactly [`Price::get_payable`].
    ///
    /// The order is deterministic: the first parts carry the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidSplitCount`] if `count` is zero and
    /// [`PriceError::AmountOutOfRange`] if the payable amount cannot be
    /// expressed in minor units.
    pub fn split_in_payables(&self, count: usize) -> Result<Vec<Self>, PriceError> {
        if count == 0 {
            return Err(PriceError::InvalidSplitCount { count });
        }
        let policy = self.rounding_policy();
        let rounded = self.payable_by_rounding_mode_checked(policy.mode, policy.precision);
        let out_of_range = || PriceError::AmountOutOfRange(self.amount().to_string());
        if rounded.overflowed {
            return Err(out_of_range());
        }

        let total = rounded
            .price
            .amount()
            .checked_mul(Decimal::from(policy.precision))
            .and_then(|units| units.round().to_i64())
            .ok_or_else(out_of_range)?;
        let count_units = i64::try_from(count).map_err(|_| PriceError::InvalidSplitCount { count })?;

        Ok(split_units(total, count_units)
            .into_iter()
            .map(|units| Self::from_minor_units(units, policy.precision, self.currency()))
            .collect())
    }
}

/// Splits `total` minor units into `count` parts that sum to `total`.
///
/// The remainder of the truncating division is spread one unit per part over
/// the first parts, carrying its sign so negative totals add up as well.
fn split_units(total: i64, count: i64) -> Vec<i64> {
    let base = total / count;
    let remainder = total % count;
    let step = remainder.signum();
    let extra = remainder.abs();

    (0..count)
        .map(|i| if i < extra { base + step } else { base })
        .collect()
}
