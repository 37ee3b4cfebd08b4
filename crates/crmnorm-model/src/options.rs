//! Configuration options for normalization.

use serde::{Deserialize, Serialize};

use crate::settings::{NORMALIZE_PREFERENCES, SettingsStore};

/// Casing mode for city and street fields.
///
/// Stored as an integer setting: 0 = off, 1 = uppercase, 2 = titlecase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseMode {
    #[default]
    Off,
    Uppercase,
    Titlecase,
}

impl CaseMode {
    /// Decode the stored integer form. Unknown values mean the option is off.
    pub fn from_setting(raw: i64) -> Self {
        match raw {
            1 => CaseMode::Uppercase,
            2 => CaseMode::Titlecase,
            _ => CaseMode::Off,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, CaseMode::Off)
    }
}

/// Options read once per normalizer instantiation.
///
/// There is no process-wide singleton: callers construct one of these
/// (directly or from a [`SettingsStore`]) and pass it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Enable name title-casing (`contact_FullFirst`).
    pub full_first: bool,
    /// Force organization names to uppercase after all other rules
    /// (`contact_OrgCaps`).
    pub org_caps: bool,
    /// City casing mode (`address_CityCaps`).
    pub city_caps: CaseMode,
    /// Street casing mode, with directional-token uppercasing in titlecase
    /// mode (`address_StreetCaps`).
    pub street_caps: CaseMode,
    /// Validate postal codes against the country pattern table
    /// (`address_Zip`).
    pub validate_postal: bool,
    /// Always format phones in international style (`phone_IntlPrefix`).
    pub intl_prefix: bool,
    /// Format phones nationally when in the default region, internationally
    /// otherwise (`phone_normalize`). Ignored when `intl_prefix` is set.
    pub phone_normalize: bool,
    /// Two-letter fallback region for phone parsing.
    pub default_region: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            full_first: false,
            org_caps: false,
            city_caps: CaseMode::Off,
            street_caps: CaseMode::Off,
            validate_postal: false,
            intl_prefix: false,
            phone_normalize: false,
            default_region: "US".to_string(),
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the recognized option keys from the settings store, falling back
    /// to defaults for anything unset.
    pub fn from_settings(store: &dyn SettingsStore) -> Self {
        let ns = NORMALIZE_PREFERENCES;
        let flag = |key: &str| {
            store
                .get(ns, key)
                .and_then(|v| v.as_bool().or_else(|| v.as_i64().map(|n| n != 0)))
                .unwrap_or(false)
        };
        let mode = |key: &str| {
            store
                .get(ns, key)
                .and_then(|v| v.as_i64())
                .map(CaseMode::from_setting)
                .unwrap_or_default()
        };
        let region = store
            .get(ns, "default_region")
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "US".to_string());

        Self {
            full_first: flag("contact_FullFirst"),
            org_caps: flag("contact_OrgCaps"),
            city_caps: mode("address_CityCaps"),
            street_caps: mode("address_StreetCaps"),
            validate_postal: flag("address_Zip"),
            intl_prefix: flag("phone_IntlPrefix"),
            phone_normalize: flag("phone_normalize"),
            default_region: region,
        }
    }

    #[must_use]
    pub fn with_full_first(mut self, enable: bool) -> Self {
        self.full_first = enable;
        self
    }

    #[must_use]
    pub fn with_org_caps(mut self, enable: bool) -> Self {
        self.org_caps = enable;
        self
    }

    #[must_use]
    pub fn with_city_caps(mut self, mode: CaseMode) -> Self {
        self.city_caps = mode;
        self
    }

    #[must_use]
    pub fn with_street_caps(mut self, mode: CaseMode) -> Self {
        self.street_caps = mode;
        self
    }

    #[must_use]
    pub fn with_postal_validation(mut self, enable: bool) -> Self {
        self.validate_postal = enable;
        self
    }

    #[must_use]
    pub fn with_intl_prefix(mut self, enable: bool) -> Self {
        self.intl_prefix = enable;
        self
    }

    #[must_use]
    pub fn with_phone_normalize(mut self, enable: bool) -> Self {
        self.phone_normalize = enable;
        self
    }

    #[must_use]
    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = region.into();
        self
    }
}
