//! Metadata-backed [`PhoneCapability`] implementation.
//!
//! Covers the regions carried in `crmnorm_standards::phone_regions`. This is
//! the provider the CLI and tests run with; deployments wired to a full
//! phone-number library implement [`PhoneCapability`] over that instead.

use crmnorm_standards::phone_regions::{
    NumberingStyle, RegionMetadata, region_for_calling_code, region_metadata,
};

use crate::phone::{ParsedNumber, PhoneCapability, PhoneCategory, PhoneFormat, PhoneParseError};

/// Stateless provider over the embedded region metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionPhoneProvider;

impl RegionPhoneProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PhoneCapability for RegionPhoneProvider {
    fn parse(&self, text: &str, default_region: &str) -> Result<ParsedNumber, PhoneParseError> {
        let trimmed = text.trim();
        if trimmed.chars().any(char::is_alphabetic) {
            return Err(PhoneParseError::InvalidCharacters);
        }
        let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(PhoneParseError::NoDigits);
        }

        if trimmed.starts_with('+') {
            return parse_international(&digits, default_region);
        }
        // 00 is the common international dialing prefix.
        if let Some(rest) = digits.strip_prefix("00")
            && !rest.is_empty()
        {
            return parse_international(rest, default_region);
        }

        let region = region_metadata(default_region)
            .ok_or_else(|| PhoneParseError::UnknownRegion(default_region.to_string()))?;
        Ok(ParsedNumber {
            region: region.region.to_string(),
            calling_code: region.calling_code,
            national_number: strip_trunk(region, digits),
        })
    }

    fn is_valid(&self, number: &ParsedNumber) -> bool {
        let Some(region) = region_metadata(&number.region) else {
            return false;
        };
        let national = &number.national_number;
        if !national.chars().all(|ch| ch.is_ascii_digit()) {
            return false;
        }
        if !region.national_lengths.contains(&national.len()) {
            return false;
        }
        match region.style {
            // NANP: neither area code nor exchange may start with 0 or 1.
            NumberingStyle::Nanp => {
                let bytes = national.as_bytes();
                bytes[0] >= b'2' && bytes[3] >= b'2'
            }
            // The trunk prefix is not part of the significant number.
            _ => !national.starts_with('0'),
        }
    }

    fn format(&self, number: &ParsedNumber, style: PhoneFormat) -> String {
        let Some(region) = region_metadata(&number.region) else {
            return number.national_number.clone();
        };
        let digits = number.national_number.as_str();

        match region.style {
            NumberingStyle::Nanp if digits.len() == 10 => match style {
                PhoneFormat::National => format!(
                    "({}) {}-{}",
                    &digits[..3],
                    &digits[3..6],
                    &digits[6..]
                ),
                PhoneFormat::International => format!(
                    "+{} {}-{}-{}",
                    number.calling_code,
                    &digits[..3],
                    &digits[3..6],
                    &digits[6..]
                ),
            },
            NumberingStyle::PairedBlocks if !digits.is_empty() => match style {
                PhoneFormat::National => {
                    let trunk = region.trunk_prefix.unwrap_or('0');
                    pair_groups(&format!("{trunk}{digits}"))
                }
                PhoneFormat::International => format!(
                    "+{} {} {}",
                    number.calling_code,
                    &digits[..1],
                    pair_groups(&digits[1..])
                ),
            },
            NumberingStyle::TrunkBlock if digits.len() > region.leading_group => {
                let (lead, rest) = digits.split_at(region.leading_group);
                match style {
                    PhoneFormat::National => {
                        let trunk = region.trunk_prefix.unwrap_or('0');
                        format!("{trunk}{lead} {rest}")
                    }
                    PhoneFormat::International => {
                        format!("+{} {} {}", number.calling_code, lead, rest)
                    }
                }
            }
            // Off-shape numbers render as bare digits rather than panic on
            // a short slice; is_valid has already rejected them upstream.
            _ => match style {
                PhoneFormat::National => digits.to_string(),
                PhoneFormat::International => format!("+{} {}", number.calling_code, digits),
            },
        }
    }

    fn calling_code(&self, number: &ParsedNumber) -> u16 {
        number.calling_code
    }

    fn calling_code_for_region(&self, region: &str) -> Option<u16> {
        region_metadata(region).map(|r| r.calling_code)
    }

    fn classify(&self, number: &ParsedNumber) -> PhoneCategory {
        let Some(region) = region_metadata(&number.region) else {
            return PhoneCategory::Other;
        };
        let national = number.national_number.as_str();
        let starts = |prefixes: &[&str]| prefixes.iter().any(|p| national.starts_with(p));

        if starts(region.pager_prefixes) {
            return PhoneCategory::Pager;
        }
        if starts(region.voicemail_prefixes) {
            return PhoneCategory::Voicemail;
        }
        if starts(region.mobile_prefixes) {
            return PhoneCategory::Mobile;
        }
        if region.fixed_indistinct {
            PhoneCategory::FixedLineOrMobile
        } else {
            PhoneCategory::FixedLine
        }
    }
}

fn parse_international(digits: &str, default_region: &str) -> Result<ParsedNumber, PhoneParseError> {
    for len in 1..=3.min(digits.len()) {
        let Ok(code) = digits[..len].parse::<u16>() else {
            continue;
        };
        if let Some(region) = region_for_calling_code(code, Some(default_region)) {
            return Ok(ParsedNumber {
                region: region.region.to_string(),
                calling_code: code,
                national_number: strip_trunk(region, digits[len..].to_string()),
            });
        }
    }
    Err(PhoneParseError::UnknownCallingCode(digits.to_string()))
}

/// Drop a leading trunk digit when the remainder is a plausible national
/// number ("+44 (0)7912 345678" carries a trunk zero it should not).
fn strip_trunk(region: &RegionMetadata, digits: String) -> String {
    if let Some(trunk) = region.trunk_prefix
        && let Some(rest) = digits.strip_prefix(trunk)
        && region.national_lengths.contains(&rest.len())
    {
        return rest.to_string();
    }
    digits
}

/// Two-digit groups separated by spaces: "0612345678" -> "06 12 34 56 78".
fn pair_groups(digits: &str) -> String {
    digits
        .as_bytes()
        .chunks(2)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}
