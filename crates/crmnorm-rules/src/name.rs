//! Name casing rules.
//!
//! The engine runs a fixed, ordered sequence of delimiter passes over each
//! name field: split on the pass's delimiter, transform every token, rejoin
//! with the same delimiter, and hand the result to the next pass. The order
//! in `crmnorm_standards::names::DELIMITERS` is load-bearing: a later pass
//! operates on the capitalization the earlier passes produced ("mcdonald"
//! only gains its inner capital because the first pass renders "Mcdonald",
//! which the "Mc" pass then splits). Changing the order changes the output.

use crmnorm_model::{ContactRecord, ContactType, NormalizeOptions, is_blank};
use crmnorm_standards::names::{
    DELIMITERS, ORG_STATUS_DOTTED, ORG_STATUS_UPPER, is_connector, is_org_minor, status_key,
};

use crate::casing::ucfirst;

/// Normalize every populated name field of the contact in place.
///
/// Returns whether any casing rule was active for this record. Empty fields
/// and the storage no-value placeholder are skipped untouched.
pub fn normalize_contact(contact: &mut ContactRecord, options: &NormalizeOptions) -> bool {
    let contact_type = contact.contact_type;
    let mut ran = false;

    if options.full_first {
        ran = true;
        let fields: Vec<&'static str> = contact
            .name_fields()
            .iter()
            .map(|(name, _)| *name)
            .collect();
        for field in fields {
            let Some(slot) = contact.name_field_mut(field) else {
                continue;
            };
            let Some(value) = slot.as_deref() else {
                continue;
            };
            if is_blank(Some(value)) {
                continue;
            }
            let rendered = normalize_name(value, contact_type);
            *slot = Some(rendered);
        }
    }

    if options.org_caps
        && contact_type == ContactType::Organization
        && !is_blank(contact.organization_name.as_deref())
    {
        ran = true;
        if let Some(name) = contact.organization_name.take() {
            contact.organization_name = Some(name.to_uppercase());
        }
    }

    ran
}

/// Run the cumulative delimiter passes over one name value.
fn normalize_name(name: &str, contact_type: ContactType) -> String {
    let is_org = contact_type == ContactType::Organization;
    let mut current = name.to_string();

    for delimiter in DELIMITERS {
        current = current
            .split(delimiter)
            .map(|token| transform_token(token, is_org))
            .collect::<Vec<_>>()
            .join(delimiter);
    }

    // A field consisting solely of a connector word still renders
    // title-case for individuals ("von" the whole name is "Von").
    if !is_org && is_connector(&current) {
        current = ucfirst(&current.to_lowercase());
    }

    current
}

fn transform_token(token: &str, is_org: bool) -> String {
    if token.is_empty() {
        return String::new();
    }

    if is_org {
        let key = status_key(token);
        if ORG_STATUS_UPPER.contains(&key.as_str()) {
            return token.to_uppercase();
        }
        if ORG_STATUS_DOTTED.contains(&key.as_str()) {
            // Dotted statuses render as "Inc.", "Co." — rewritten to the
            // dotted lowercase base, then the generic capitalization below.
            return ucfirst(&format!("{key}."));
        }
        if is_org_minor(token) {
            return token.to_lowercase();
        }
        if is_connector(token) {
            return token.to_string();
        }
        return ucfirst(token);
    }

    if is_connector(token) {
        return token.to_lowercase();
    }
    ucfirst(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crmnorm_model::{ContactId, ContactType};

    fn options() -> NormalizeOptions {
        NormalizeOptions::new().with_full_first(true)
    }

    fn individual(first: &str, last: &str) -> ContactRecord {
        let mut contact = ContactRecord::new(ContactId(1), ContactType::Individual);
        contact.first_name = Some(first.to_string());
        contact.last_name = Some(last.to_string());
        contact
    }

    fn organization(name: &str) -> ContactRecord {
        let mut contact = ContactRecord::new(ContactId(2), ContactType::Organization);
        contact.organization_name = Some(name.to_string());
        contact
    }

    #[test]
    fn individual_hyphen_and_connector() {
        let mut contact = individual("jean-pierre", "DE castignac");
        normalize_contact(&mut contact, &options());
        assert_eq!(contact.first_name.as_deref(), Some("Jean-Pierre"));
        assert_eq!(contact.last_name.as_deref(), Some("de Castignac"));
    }

    #[test]
    fn connector_only_field_is_title_cased() {
        for word in ["von", "VAN", "Der"] {
            let mut contact = individual(word, "x");
            normalize_contact(&mut contact, &options());
            let rendered = contact.first_name.unwrap();
            assert_eq!(rendered, ucfirst(&word.to_lowercase()), "input {word:?}");
        }
    }

    #[test]
    fn apostrophe_and_mc_passes_build_on_earlier_output() {
        let mut contact = individual("o'brien-smith", "mcdonald");
        normalize_contact(&mut contact, &options());
        assert_eq!(contact.first_name.as_deref(), Some("O'Brien-Smith"));
        assert_eq!(contact.last_name.as_deref(), Some("McDonald"));
    }

    #[test]
    fn d_apostrophe_capitalizes_inner() {
        let mut contact = individual("d'angelo", "x");
        normalize_contact(&mut contact, &options());
        assert_eq!(contact.first_name.as_deref(), Some("D'Angelo"));
    }

    #[test]
    fn organization_status_uppercase() {
        let mut contact = organization("it bliss, llc");
        normalize_contact(&mut contact, &options());
        assert_eq!(contact.organization_name.as_deref(), Some("It Bliss, LLC"));
    }

    #[test]
    fn organization_acronym_tail_survives() {
        let mut contact = organization("IT bliss, LLC");
        normalize_contact(&mut contact, &options());
        assert_eq!(contact.organization_name.as_deref(), Some("IT Bliss, LLC"));
    }

    #[test]
    fn organization_dotted_status() {
        let mut contact = organization("frank and sons moving co");
        normalize_contact(&mut contact, &options());
        assert_eq!(
            contact.organization_name.as_deref(),
            Some("Frank and Sons Moving Co.")
        );
    }

    #[test]
    fn organization_dotted_status_already_dotted() {
        let mut contact = organization("acme widgets inc.");
        normalize_contact(&mut contact, &options());
        assert_eq!(
            contact.organization_name.as_deref(),
            Some("Acme Widgets Inc.")
        );
    }

    #[test]
    fn org_caps_overrides_full_first() {
        let mut contact = organization("it bliss, llc");
        let options = options().with_org_caps(true);
        normalize_contact(&mut contact, &options);
        assert_eq!(contact.organization_name.as_deref(), Some("IT BLISS, LLC"));
    }

    #[test]
    fn org_caps_ignores_individuals() {
        let mut contact = individual("ada", "lovelace");
        contact.organization_name = Some("self".to_string());
        let options = NormalizeOptions::new().with_org_caps(true);
        assert!(!normalize_contact(&mut contact, &options));
        assert_eq!(contact.organization_name.as_deref(), Some("self"));
    }

    #[test]
    fn disabled_options_do_nothing() {
        let mut contact = individual("jean-pierre", "DE castignac");
        let untouched = contact.clone();
        assert!(!normalize_contact(&mut contact, &NormalizeOptions::new()));
        assert_eq!(contact, untouched);
    }

    #[test]
    fn blank_and_placeholder_fields_are_skipped() {
        let mut contact = individual("ada", "lovelace");
        contact.middle_name = Some(String::new());
        contact.nick_name = Some("null".to_string());
        normalize_contact(&mut contact, &options());
        assert_eq!(contact.middle_name.as_deref(), Some(""));
        assert_eq!(contact.nick_name.as_deref(), Some("null"));
    }

    #[test]
    fn all_name_fields_participate() {
        let mut contact = ContactRecord::new(ContactId(3), ContactType::Individual);
        contact.household_name = Some("van dyke household".to_string());
        contact.legal_name = Some("ada lovelace".to_string());
        contact.nick_name = Some("ada".to_string());
        normalize_contact(&mut contact, &options());
        assert_eq!(
            contact.household_name.as_deref(),
            Some("van Dyke Household")
        );
        assert_eq!(contact.legal_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(contact.nick_name.as_deref(), Some("Ada"));
    }
}
