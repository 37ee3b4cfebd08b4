//! Data model for the contact normalization engine.
//!
//! This crate defines the typed records the normalizers operate on, the
//! configuration options that drive them, the settings-store seam, and the
//! result/warning types a batch run produces. It has no behavior of its own
//! beyond field access and settings decoding.

pub mod contact;
pub mod error;
pub mod ids;
pub mod options;
pub mod result;
pub mod settings;

pub use crate::contact::{
    AddressRecord, ContactRecord, ContactType, PhoneRecord, PhoneType, is_blank,
};
pub use crate::error::{NormalizeError, Result};
pub use crate::ids::{AddressId, ContactId, CountryId, PhoneId};
pub use crate::options::{CaseMode, NormalizeOptions};
pub use crate::result::{NormalizationResult, NormalizeWarning};
pub use crate::settings::{JsonSettings, SettingsStore, NORMALIZE_PREFERENCES};
