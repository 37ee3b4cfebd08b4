//! Country table for the countries the postal rules cover.
//!
//! Ids are ISO 3166-1 numeric codes, which is also what the CSV store uses
//! for `country_id`. Unknown ids simply resolve to no ISO code, which makes
//! postal validation skip silently.

use crmnorm_model::CountryId;

/// (id, iso2, display name)
pub const COUNTRIES: &[(u32, &str, &str)] = &[
    (124, "CA", "Canada"),
    (250, "FR", "France"),
    (276, "DE", "Germany"),
    (438, "LI", "Liechtenstein"),
    (528, "NL", "Netherlands"),
    (756, "CH", "Switzerland"),
    (826, "GB", "United Kingdom"),
    (840, "US", "United States"),
];

/// Resolve a stored country id to its ISO 3166-1 alpha-2 code.
pub fn iso_code(id: CountryId) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(raw, _, _)| *raw == id.0)
        .map(|(_, iso, _)| *iso)
}

/// Display name for a stored country id.
pub fn country_name(id: CountryId) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(raw, _, _)| *raw == id.0)
        .map(|(_, _, name)| *name)
}
