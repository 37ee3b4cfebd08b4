//! Phone normalization over the external parsing capability.
//!
//! Parsing, validation, formatting, and classification belong to an outside
//! library; [`PhoneCapability`] is its seam. The rule itself only decides
//! which format to render and how a classification maps onto the stored
//! phone type taxonomy.

use thiserror::Error;
use tracing::debug;

use crmnorm_model::{NormalizeOptions, PhoneRecord, PhoneType, is_blank};

/// Output style for a formatted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneFormat {
    National,
    International,
}

/// What the classifier says a number is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneCategory {
    FixedLine,
    /// The numbering plan cannot tell fixed lines and mobiles apart.
    FixedLineOrMobile,
    Mobile,
    Pager,
    Voicemail,
    /// Anything else (toll-free, premium, unknown); leaves the stored type
    /// alone.
    Other,
}

/// A successfully parsed number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedNumber {
    /// Region the number belongs to (two-letter code).
    pub region: String,
    pub calling_code: u16,
    /// National significant number, digits only, trunk prefix stripped.
    pub national_number: String,
}

#[derive(Debug, Error)]
pub enum PhoneParseError {
    #[error("no digits in input")]
    NoDigits,
    #[error("input contains invalid characters")]
    InvalidCharacters,
    #[error("unknown calling code in {0:?}")]
    UnknownCallingCode(String),
    #[error("unsupported region {0:?}")]
    UnknownRegion(String),
}

/// Seam for the external phone-number library.
pub trait PhoneCapability {
    fn parse(&self, text: &str, default_region: &str) -> Result<ParsedNumber, PhoneParseError>;
    fn is_valid(&self, number: &ParsedNumber) -> bool;
    fn format(&self, number: &ParsedNumber, style: PhoneFormat) -> String;
    fn calling_code(&self, number: &ParsedNumber) -> u16;
    fn calling_code_for_region(&self, region: &str) -> Option<u16>;
    fn classify(&self, number: &ParsedNumber) -> PhoneCategory;
}

/// Normalize one phone sub-record in place.
///
/// Returns true iff the number parsed and validated, whether or not any
/// field value changed. An absent, blank, unparseable, or invalid number
/// leaves the record untouched and returns false.
pub fn normalize_phone(
    phone: &mut PhoneRecord,
    provider: &dyn PhoneCapability,
    options: &NormalizeOptions,
) -> bool {
    let Some(raw) = phone.phone.clone() else {
        return false;
    };
    if is_blank(Some(&raw)) {
        return false;
    }

    let parsed = match provider.parse(&raw, &options.default_region) {
        Ok(parsed) => parsed,
        Err(error) => {
            debug!(phone = %phone.id, %error, "phone left unchanged: unparseable");
            return false;
        }
    };
    if !provider.is_valid(&parsed) {
        debug!(phone = %phone.id, "phone left unchanged: invalid number");
        return false;
    }

    if options.intl_prefix {
        phone.phone = Some(provider.format(&parsed, PhoneFormat::International));
    } else if options.phone_normalize {
        let home_code = provider.calling_code_for_region(&options.default_region);
        let style = if home_code == Some(provider.calling_code(&parsed)) {
            PhoneFormat::National
        } else {
            PhoneFormat::International
        };
        phone.phone = Some(provider.format(&parsed, style));
    }

    apply_classification(phone, provider.classify(&parsed));
    true
}

/// Map a classification onto the stored taxonomy. Fax is never assigned
/// here; only the caller can set or preserve it.
fn apply_classification(phone: &mut PhoneRecord, category: PhoneCategory) {
    match category {
        PhoneCategory::FixedLine => phone.phone_type = Some(PhoneType::Phone),
        PhoneCategory::Mobile => phone.phone_type = Some(PhoneType::Mobile),
        PhoneCategory::Pager => phone.phone_type = Some(PhoneType::Pager),
        PhoneCategory::Voicemail => phone.phone_type = Some(PhoneType::Voicemail),
        PhoneCategory::FixedLineOrMobile => {
            if !matches!(phone.phone_type, Some(PhoneType::Phone | PhoneType::Mobile)) {
                phone.phone_type = Some(PhoneType::Phone);
            }
        }
        PhoneCategory::Other => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crmnorm_model::PhoneId;

    /// Capability stub with scripted answers.
    struct Scripted {
        valid: bool,
        category: PhoneCategory,
    }

    impl PhoneCapability for Scripted {
        fn parse(&self, text: &str, _region: &str) -> Result<ParsedNumber, PhoneParseError> {
            if text.contains('x') {
                return Err(PhoneParseError::InvalidCharacters);
            }
            Ok(ParsedNumber {
                region: "US".to_string(),
                calling_code: 1,
                national_number: text.chars().filter(char::is_ascii_digit).collect(),
            })
        }

        fn is_valid(&self, _number: &ParsedNumber) -> bool {
            self.valid
        }

        fn format(&self, number: &ParsedNumber, style: PhoneFormat) -> String {
            match style {
                PhoneFormat::National => format!("national:{}", number.national_number),
                PhoneFormat::International => format!("+{} {}", number.calling_code, number.national_number),
            }
        }

        fn calling_code(&self, number: &ParsedNumber) -> u16 {
            number.calling_code
        }

        fn calling_code_for_region(&self, region: &str) -> Option<u16> {
            match region {
                "US" => Some(1),
                "FR" => Some(33),
                _ => None,
            }
        }

        fn classify(&self, _number: &ParsedNumber) -> PhoneCategory {
            self.category
        }
    }

    fn record(raw: &str) -> PhoneRecord {
        PhoneRecord::new(PhoneId(1), raw)
    }

    #[test]
    fn unparseable_and_invalid_left_unchanged() {
        let options = NormalizeOptions::new().with_phone_normalize(true);
        let provider = Scripted {
            valid: true,
            category: PhoneCategory::Other,
        };

        let mut bad = record("x123");
        assert!(!normalize_phone(&mut bad, &provider, &options));
        assert_eq!(bad.phone.as_deref(), Some("x123"));

        let invalid_provider = Scripted {
            valid: false,
            category: PhoneCategory::Other,
        };
        let mut invalid = record("12345");
        assert!(!normalize_phone(&mut invalid, &invalid_provider, &options));
        assert_eq!(invalid.phone.as_deref(), Some("12345"));
        assert_eq!(invalid.phone_type, None);
    }

    #[test]
    fn blank_phone_is_skipped() {
        let options = NormalizeOptions::new().with_phone_normalize(true);
        let provider = Scripted {
            valid: true,
            category: PhoneCategory::Mobile,
        };
        let mut empty = PhoneRecord {
            id: PhoneId(2),
            phone: Some(String::new()),
            phone_type: None,
        };
        assert!(!normalize_phone(&mut empty, &provider, &options));
        let mut absent = PhoneRecord {
            id: PhoneId(3),
            phone: None,
            phone_type: None,
        };
        assert!(!normalize_phone(&mut absent, &provider, &options));
    }

    #[test]
    fn intl_prefix_wins_over_phone_normalize() {
        let options = NormalizeOptions::new()
            .with_intl_prefix(true)
            .with_phone_normalize(true);
        let provider = Scripted {
            valid: true,
            category: PhoneCategory::Other,
        };
        let mut phone = record("2025551234");
        assert!(normalize_phone(&mut phone, &provider, &options));
        assert_eq!(phone.phone.as_deref(), Some("+1 2025551234"));
    }

    #[test]
    fn phone_normalize_picks_national_at_home() {
        let provider = Scripted {
            valid: true,
            category: PhoneCategory::Other,
        };
        let home = NormalizeOptions::new().with_phone_normalize(true);
        let mut phone = record("2025551234");
        normalize_phone(&mut phone, &provider, &home);
        assert_eq!(phone.phone.as_deref(), Some("national:2025551234"));

        let abroad = NormalizeOptions::new()
            .with_phone_normalize(true)
            .with_default_region("FR");
        let mut phone = record("2025551234");
        normalize_phone(&mut phone, &provider, &abroad);
        assert_eq!(phone.phone.as_deref(), Some("+1 2025551234"));
    }

    #[test]
    fn no_format_flags_leave_text_alone() {
        let provider = Scripted {
            valid: true,
            category: PhoneCategory::Mobile,
        };
        let mut phone = record("202-555-1234");
        assert!(normalize_phone(&mut phone, &provider, &NormalizeOptions::new()));
        assert_eq!(phone.phone.as_deref(), Some("202-555-1234"));
        // Classification still ran.
        assert_eq!(phone.phone_type, Some(PhoneType::Mobile));
    }

    #[test]
    fn ambiguous_classification_keeps_phone_or_mobile() {
        let provider = Scripted {
            valid: true,
            category: PhoneCategory::FixedLineOrMobile,
        };
        let options = NormalizeOptions::new();

        let mut kept_mobile = record("2025551234");
        kept_mobile.phone_type = Some(PhoneType::Mobile);
        normalize_phone(&mut kept_mobile, &provider, &options);
        assert_eq!(kept_mobile.phone_type, Some(PhoneType::Mobile));

        let mut was_fax = record("2025551234");
        was_fax.phone_type = Some(PhoneType::Fax);
        normalize_phone(&mut was_fax, &provider, &options);
        assert_eq!(was_fax.phone_type, Some(PhoneType::Phone));

        let mut unset = record("2025551234");
        normalize_phone(&mut unset, &provider, &options);
        assert_eq!(unset.phone_type, Some(PhoneType::Phone));
    }

    #[test]
    fn other_classification_preserves_existing_type() {
        let provider = Scripted {
            valid: true,
            category: PhoneCategory::Other,
        };
        let mut fax = record("2025551234");
        fax.phone_type = Some(PhoneType::Fax);
        normalize_phone(&mut fax, &provider, &NormalizeOptions::new());
        assert_eq!(fax.phone_type, Some(PhoneType::Fax));
    }

    #[test]
    fn pager_and_voicemail_assignments() {
        for (category, expected) in [
            (PhoneCategory::Pager, PhoneType::Pager),
            (PhoneCategory::Voicemail, PhoneType::Voicemail),
            (PhoneCategory::FixedLine, PhoneType::Phone),
        ] {
            let provider = Scripted {
                valid: true,
                category,
            };
            let mut phone = record("2025551234");
            normalize_phone(&mut phone, &provider, &NormalizeOptions::new());
            assert_eq!(phone.phone_type, Some(expected), "{category:?}");
        }
    }
}
