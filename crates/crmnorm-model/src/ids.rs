//! Identifier newtypes for stored records.
//!
//! Identity fields are never rewritten by normalization; giving each record
//! family its own id type keeps the three result sets from mixing.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }
    };
}

id_type!(
    /// Identifier of a contact record.
    ContactId
);
id_type!(
    /// Identifier of a phone sub-record.
    PhoneId
);
id_type!(
    /// Identifier of an address sub-record.
    AddressId
);
id_type!(
    /// Identifier of a country in the stored country table.
    CountryId
);

impl ContactId {
    /// Iterate the inclusive ascending range `self..=to`.
    pub fn range_to(self, to: ContactId) -> impl Iterator<Item = ContactId> {
        (self.0..=to.0).map(ContactId)
    }
}
