//! Address casing and postal-code validation.

use crmnorm_model::{AddressRecord, CaseMode, NormalizeOptions, NormalizeWarning, is_blank};
use crmnorm_standards::{countries, postal, street};

use crate::casing::title_case_words;

/// Normalize one address sub-record in place.
///
/// Never fails; postal-code mismatches come back as warnings and the stored
/// code is left exactly as it was.
pub fn normalize_address(
    address: &mut AddressRecord,
    options: &NormalizeOptions,
) -> Vec<NormalizeWarning> {
    if let Some(city) = address.city.as_deref()
        && !is_blank(Some(city))
    {
        let rendered = match options.city_caps {
            CaseMode::Off => None,
            CaseMode::Uppercase => Some(city.to_uppercase()),
            CaseMode::Titlecase => Some(title_case_words(city)),
        };
        if rendered.is_some() {
            address.city = rendered;
        }
    }

    if options.street_caps.is_active() {
        let mode = options.street_caps;
        for slot in address.street_fields_mut() {
            let Some(line) = slot.as_deref() else {
                continue;
            };
            if is_blank(Some(line)) {
                continue;
            }
            let rendered = match mode {
                CaseMode::Off => continue,
                CaseMode::Uppercase => line.to_uppercase(),
                // Titlecase then restore directional tokens ("ne" in a
                // street line is a quadrant, not a word).
                CaseMode::Titlecase => street::uppercase_directionals(&title_case_words(line)),
            };
            *slot = Some(rendered);
        }
    }

    let mut warnings = Vec::new();
    if options.validate_postal {
        warnings.extend(check_postal(address));
    }
    warnings
}

fn check_postal(address: &AddressRecord) -> Option<NormalizeWarning> {
    let code = address.postal_code.as_deref()?;
    if is_blank(Some(code)) {
        return None;
    }
    let country_id = address.country_id?;
    let iso = countries::iso_code(country_id)?;
    match postal::validate_postal(iso, code) {
        // No rule for this country, or the code checks out.
        None | Some(true) => None,
        Some(false) => Some(NormalizeWarning::PostalMismatch {
            address: address.id,
            postal_code: code.to_string(),
            country: iso.to_string(),
        }),
    }
}
