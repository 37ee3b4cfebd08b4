//! Result and warning types for a batch run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::{AddressId, ContactId, PhoneId};

/// Non-fatal findings surfaced alongside a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizeWarning {
    /// A postal code failed its country's validation rule. The stored value
    /// is left untouched; the mismatch only rides this side channel.
    PostalMismatch {
        address: AddressId,
        postal_code: String,
        country: String,
    },
    /// The change log could not be opened or appended. Logging is
    /// best-effort and never aborts the batch.
    LogWrite { message: String },
}

impl std::fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeWarning::PostalMismatch {
                address,
                postal_code,
                country,
            } => write!(
                f,
                "address {address}: postal code {postal_code:?} does not match the {country} format"
            ),
            NormalizeWarning::LogWrite { message } => {
                write!(f, "change log write failed: {message}")
            }
        }
    }
}

/// Identifiers changed (or, in a dry run, that would change) in one run,
/// split by category, plus any warnings gathered along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub names: BTreeSet<ContactId>,
    pub phones: BTreeSet<PhoneId>,
    pub addresses: BTreeSet<AddressId>,
    pub warnings: Vec<NormalizeWarning>,
}

impl NormalizationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another result (e.g. one chunk of a larger range) into this one.
    pub fn merge(&mut self, other: NormalizationResult) {
        self.names.extend(other.names);
        self.phones.extend(other.phones);
        self.addresses.extend(other.addresses);
        self.warnings.extend(other.warnings);
    }

    /// Total number of changed records across the three categories.
    pub fn changed_count(&self) -> usize {
        self.names.len() + self.phones.len() + self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changed_count() == 0 && self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates_sets() {
        let mut left = NormalizationResult::new();
        left.names.insert(ContactId(1));
        left.phones.insert(PhoneId(10));

        let mut right = NormalizationResult::new();
        right.names.insert(ContactId(1));
        right.names.insert(ContactId(2));
        right.addresses.insert(AddressId(5));

        left.merge(right);
        assert_eq!(left.names.len(), 2);
        assert_eq!(left.phones.len(), 1);
        assert_eq!(left.addresses.len(), 1);
        assert_eq!(left.changed_count(), 4);
    }
}
