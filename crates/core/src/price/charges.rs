//! Keyed collection of charges composing a total.
//!
//! Storage is shared copy-on-write: cloning `Charges` is cheap, and a clone
//! or a snapshot from [`Charges::get_all_charges`] never observes later
//! mutations of the original.
//!
//! Entries are always keyed by their own `charge_type`; maps built or decoded
//! with other keys are re-keyed on the way in.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::charge::Charge;
use super::error::PriceError;

/// All charges of a total, at most one per charge type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Charge>",
    into = "BTreeMap<String, Charge>"
)]
pub struct Charges {
    by_type: Arc<BTreeMap<String, Charge>>,
}

impl Charges {
    /// Creates a collection from a map of charges.
    ///
    /// Only the charges are used: each is stored under its `charge_type`,
    /// whatever key it had in `by_type`. Charges sharing a type keep the
    /// one with the greatest key.
    #[must_use]
    pub fn new(by_type: BTreeMap<String, Charge>) -> Self {
        by_type.into_values().collect()
    }

    /// Returns true if a charge of `charge_type` exists.
    #[must_use]
    pub fn has_type(&self, charge_type: &str) -> bool {
        self.by_type.contains_key(charge_type)
    }

    /// The charge of `charge_type`, if any.
    #[must_use]
    pub fn get_by_type(&self, charge_type: &str) -> Option<&Charge> {
        self.by_type.get(charge_type)
    }

    /// The charge of `charge_type`, or a zero charge if absent.
    ///
    /// Use [`Charges::get_by_type`] when presence matters.
    #[must_use]
    pub fn get_by_type_forced(&self, charge_type: &str) -> Charge {
        self.get_by_type(charge_type).cloned().unwrap_or_default()
    }

    /// A snapshot of all charges.
    #[must_use]
    pub fn get_all_charges(&self) -> Arc<BTreeMap<String, Charge>> {
        Arc::clone(&self.by_type)
    }

    /// Iterates the charges ordered by type.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Charge)> {
        self.by_type.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of charge types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Returns true if there are no charges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Adds a charge.
    ///
    /// An existing charge of the same type is merged and the result rounded
    /// to payable amounts; a new type is stored as given.
    ///
    /// # Errors
    ///
    /// Returns the merge error; the collection is left unchanged.
    pub fn add_charge(&mut self, charge: Charge) -> Result<(), PriceError> {
        let merged = merge_into(&self.by_type, charge)?;
        Arc::make_mut(&mut self.by_type).insert(merged.charge_type.clone(), merged);
        Ok(())
    }

    /// Adds every charge of `other`.
    ///
    /// # Errors
    ///
    /// Returns the first merge error; nothing is applied in that case.
    pub fn add(&mut self, other: &Self) -> Result<(), PriceError> {
        let mut by_type = (*self.by_type).clone();
        for charge in other.by_type.values() {
            let merged = merge_into(&by_type, charge.clone())?;
            by_type.insert(merged.charge_type.clone(), merged);
        }
        self.by_type = Arc::new(by_type);
        Ok(())
    }

    /// Multiplies every charge by `qty`.
    pub fn mul(&mut self, qty: i64) {
        if self.by_type.is_empty() {
            return;
        }
        for charge in Arc::make_mut(&mut self.by_type).values_mut() {
            *charge = charge.mul(qty);
        }
    }
}

/// The charge to store for `charge` given the existing entries.
fn merge_into(by_type: &BTreeMap<String, Charge>, charge: Charge) -> Result<Charge, PriceError> {
    match by_type.get(&charge.charge_type) {
        Some(existing) => existing
            .add(&charge)
            .map(|sum| sum.get_payable())
            .inspect_err(|err| {
                debug!(charge_type = %charge.charge_type, error = %err, "Failed to merge charge");
            }),
        None => Ok(charge),
    }
}

impl FromIterator<Charge> for Charges {
    /// Collects charges keyed by their type; later charges of the same type
    /// replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Charge>>(iter: I) -> Self {
        let by_type = iter
            .into_iter()
            .map(|charge| (charge.charge_type.clone(), charge))
            .collect();
        Self {
            by_type: Arc::new(by_type),
        }
    }
}

impl From<BTreeMap<String, Charge>> for Charges {
    fn from(by_type: BTreeMap<String, Charge>) -> Self {
        Self::new(by_type)
    }
}

impl From<Charges> for BTreeMap<String, Charge> {
    fn from(charges: Charges) -> Self {
        Arc::unwrap_or_clone(charges.by_type)
    }
}
