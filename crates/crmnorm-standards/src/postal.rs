//! Per-country postal-code validation rules.
//!
//! Most countries are shape patterns (full-string anchored regexes). A
//! country whose code space is a closed set carries the full enumeration
//! instead; Liechtenstein is the carried example.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// A country's postal-code rule.
#[derive(Debug, Clone, Copy)]
pub enum PostalRule {
    /// Full-string anchored regex the code must match.
    Pattern(&'static str),
    /// Closed enumeration of every valid code.
    Enumeration(&'static [&'static str]),
}

/// Every postal code in use in Liechtenstein.
const LI_CODES: &[&str] = &[
    "9485", "9486", "9487", "9488", "9489", "9490", "9491", "9492", "9493", "9494", "9495",
    "9496", "9497", "9498",
];

const RULES: &[(&str, PostalRule)] = &[
    ("CA", PostalRule::Pattern(r"^[A-Za-z]\d[A-Za-z]\s*\d[A-Za-z]\d$")),
    ("CH", PostalRule::Pattern(r"^\d{4}$")),
    ("DE", PostalRule::Pattern(r"^\d{5}$")),
    ("FR", PostalRule::Pattern(r"^\d{5}$")),
    ("GB", PostalRule::Pattern(r"^[A-Za-z]{1,2}\d[A-Za-z\d]?\s*\d[A-Za-z]{2}$")),
    ("LI", PostalRule::Enumeration(LI_CODES)),
    ("NL", PostalRule::Pattern(r"^\d{4}\s*[A-Za-z]{2}$")),
    ("US", PostalRule::Pattern(r"^\d{5}(-\d{4})?$")),
];

static COMPILED: LazyLock<BTreeMap<&'static str, Regex>> = LazyLock::new(|| {
    RULES
        .iter()
        .filter_map(|(iso, rule)| match rule {
            PostalRule::Pattern(pattern) => Some((
                *iso,
                Regex::new(pattern).expect("static postal pattern is valid"),
            )),
            PostalRule::Enumeration(_) => None,
        })
        .collect()
});

/// The rule for an ISO country code, if one is carried.
pub fn postal_rule(iso2: &str) -> Option<&'static PostalRule> {
    RULES
        .iter()
        .find(|(iso, _)| iso.eq_ignore_ascii_case(iso2))
        .map(|(_, rule)| rule)
}

/// Validate a code against its country's rule.
///
/// Returns `None` when no rule exists for the country (validation skips
/// silently), otherwise whether the code matches.
pub fn validate_postal(iso2: &str, code: &str) -> Option<bool> {
    let rule = postal_rule(iso2)?;
    let matched = match rule {
        PostalRule::Pattern(_) => COMPILED
            .get(iso2.to_ascii_uppercase().as_str())
            .is_some_and(|re| re.is_match(code)),
        PostalRule::Enumeration(codes) => codes.iter().any(|c| c.eq_ignore_ascii_case(code)),
    };
    Some(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_zip_shapes() {
        assert_eq!(validate_postal("US", "12345"), Some(true));
        assert_eq!(validate_postal("US", "12345-6789"), Some(true));
        assert_eq!(validate_postal("US", "123"), Some(false));
        assert_eq!(validate_postal("US", "1234A"), Some(false));
    }

    #[test]
    fn nl_allows_space_between_groups() {
        assert_eq!(validate_postal("NL", "1234 AB"), Some(true));
        assert_eq!(validate_postal("NL", "1234AB"), Some(true));
        assert_eq!(validate_postal("NL", "12345"), Some(false));
    }

    #[test]
    fn enumeration_is_closed() {
        assert_eq!(validate_postal("LI", "9490"), Some(true));
        assert_eq!(validate_postal("LI", "9484"), Some(false));
        assert_eq!(validate_postal("LI", "94900"), Some(false));
    }

    #[test]
    fn unknown_country_skips() {
        assert_eq!(validate_postal("ZZ", "12345"), None);
    }

    #[test]
    fn anchoring_rejects_embedded_matches() {
        assert_eq!(validate_postal("FR", "x75008"), Some(false));
        assert_eq!(validate_postal("FR", "75008 cedex"), Some(false));
    }
}
