//! Typed contact, phone, and address records.
//!
//! Records are copies of what the store holds: normalization mutates the
//! copy and the store decides whether to persist it. Every record exposes
//! `normalizable_fields`, the exact projection the differ is allowed to
//! compare. Identity and type fields never appear in that projection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::ids::{AddressId, ContactId, CountryId, PhoneId};

/// Storage placeholder meaning "no value"; skipped by every normalizer.
pub const NO_VALUE: &str = "null";

/// Returns true when a field carries no usable value (absent, empty, or the
/// storage placeholder).
pub fn is_blank(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(text) => text.is_empty() || text == NO_VALUE,
    }
}

/// Contact type as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactType {
    Individual,
    Organization,
    Household,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Individual => "Individual",
            ContactType::Organization => "Organization",
            ContactType::Household => "Household",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Individual" => Ok(ContactType::Individual),
            "Organization" => Ok(ContactType::Organization),
            "Household" => Ok(ContactType::Household),
            other => Err(NormalizeError::UnknownContactType(other.to_string())),
        }
    }
}

/// Phone type taxonomy backed by the stored integer ids.
///
/// Classification may rewrite this field, with one exception: `Fax` is never
/// assigned by classification, only set or preserved by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PhoneType {
    Phone = 1,
    Mobile = 2,
    Fax = 3,
    Pager = 4,
    Voicemail = 5,
}

impl PhoneType {
    pub fn as_id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: i64) -> Result<Self, NormalizeError> {
        match id {
            1 => Ok(PhoneType::Phone),
            2 => Ok(PhoneType::Mobile),
            3 => Ok(PhoneType::Fax),
            4 => Ok(PhoneType::Pager),
            5 => Ok(PhoneType::Voicemail),
            other => Err(NormalizeError::UnknownPhoneType(other)),
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_id())
    }
}

/// A contact's name fields plus the type that selects the casing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: ContactId,
    pub contact_type: ContactType,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub organization_name: Option<String>,
    pub household_name: Option<String>,
    pub legal_name: Option<String>,
    pub nick_name: Option<String>,
}

impl ContactRecord {
    /// A record with the given identity and no populated name fields.
    pub fn new(id: ContactId, contact_type: ContactType) -> Self {
        Self {
            id,
            contact_type,
            first_name: None,
            middle_name: None,
            last_name: None,
            organization_name: None,
            household_name: None,
            legal_name: None,
            nick_name: None,
        }
    }

    /// The name fields normalization may rewrite, in stable order.
    pub fn name_fields(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("first_name", self.first_name.as_deref()),
            ("middle_name", self.middle_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("organization_name", self.organization_name.as_deref()),
            ("household_name", self.household_name.as_deref()),
            ("legal_name", self.legal_name.as_deref()),
            ("nick_name", self.nick_name.as_deref()),
        ]
    }

    /// Mutable access to a name field by its stored column name.
    pub fn name_field_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "first_name" => Some(&mut self.first_name),
            "middle_name" => Some(&mut self.middle_name),
            "last_name" => Some(&mut self.last_name),
            "organization_name" => Some(&mut self.organization_name),
            "household_name" => Some(&mut self.household_name),
            "legal_name" => Some(&mut self.legal_name),
            "nick_name" => Some(&mut self.nick_name),
            _ => None,
        }
    }

    /// Projection handed to the differ. Never includes id or contact_type.
    pub fn normalizable_fields(&self) -> Vec<(&'static str, Option<String>)> {
        self.name_fields()
            .into_iter()
            .map(|(name, value)| (name, value.map(str::to_string)))
            .collect()
    }
}

/// One phone sub-record of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub id: PhoneId,
    pub phone: Option<String>,
    pub phone_type: Option<PhoneType>,
}

impl PhoneRecord {
    pub fn new(id: PhoneId, phone: impl Into<String>) -> Self {
        Self {
            id,
            phone: Some(phone.into()),
            phone_type: None,
        }
    }

    /// Projection handed to the differ: the number text and the type id,
    /// which classification is allowed to rewrite.
    pub fn normalizable_fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("phone", self.phone.clone()),
            ("phone_type_id", self.phone_type.map(|t| t.to_string())),
        ]
    }
}

/// One address sub-record of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub id: AddressId,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub street_address: Option<String>,
    pub supplemental_address_1: Option<String>,
    pub supplemental_address_2: Option<String>,
    pub country_id: Option<CountryId>,
}

impl AddressRecord {
    pub fn new(id: AddressId) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// The street-line fields that share the street casing rules.
    pub fn street_fields_mut(&mut self) -> [&mut Option<String>; 3] {
        [
            &mut self.street_address,
            &mut self.supplemental_address_1,
            &mut self.supplemental_address_2,
        ]
    }

    /// Projection handed to the differ. `country_id` is identity-adjacent
    /// context and is deliberately excluded; `postal_code` is included even
    /// though validation never rewrites it, so a regression there would
    /// surface as an unexpected diff.
    pub fn normalizable_fields(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("city", self.city.clone()),
            ("postal_code", self.postal_code.clone()),
            ("street_address", self.street_address.clone()),
            (
                "supplemental_address_1",
                self.supplemental_address_1.clone(),
            ),
            (
                "supplemental_address_2",
                self.supplemental_address_2.clone(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_type_round_trip() {
        assert_eq!(
            "Individual".parse::<ContactType>().unwrap(),
            ContactType::Individual
        );
        assert_eq!(ContactType::Organization.to_string(), "Organization");
        assert!("Robot".parse::<ContactType>().is_err());
    }

    #[test]
    fn phone_type_ids() {
        assert_eq!(PhoneType::from_id(2).unwrap(), PhoneType::Mobile);
        assert_eq!(PhoneType::Fax.as_id(), 3);
        assert!(PhoneType::from_id(9).is_err());
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("null")));
        assert!(!is_blank(Some("Ada")));
    }

    #[test]
    fn normalizable_fields_exclude_identity() {
        let contact = ContactRecord::new(ContactId(7), ContactType::Individual);
        let fields = contact.normalizable_fields();
        assert!(fields.iter().all(|(name, _)| *name != "id"));
        assert!(fields.iter().all(|(name, _)| *name != "contact_type"));
        assert_eq!(fields.len(), 7);
    }
}
