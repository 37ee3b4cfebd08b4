//! Region metadata behind the built-in phone capability.
//!
//! One row per supported region: calling code, accepted national-number
//! lengths, trunk prefix, classification prefixes, and the rendering style
//! used for national/international formatting. Prefixes are matched against
//! the national significant number (trunk stripped).

/// How a region groups digits for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingStyle {
    /// North American plan: `(AAA) BBB-CCCC` nationally, `+1 AAA-BBB-CCCC`
    /// internationally.
    Nanp,
    /// Leading digit then two-digit groups (France).
    PairedBlocks,
    /// Trunk plus a leading block, then the remainder.
    TrunkBlock,
}

#[derive(Debug, Clone, Copy)]
pub struct RegionMetadata {
    pub region: &'static str,
    pub calling_code: u16,
    /// Accepted significant-digit counts (trunk prefix excluded).
    pub national_lengths: &'static [usize],
    pub trunk_prefix: Option<char>,
    pub mobile_prefixes: &'static [&'static str],
    pub pager_prefixes: &'static [&'static str],
    pub voicemail_prefixes: &'static [&'static str],
    /// The plan cannot distinguish fixed lines from mobiles (NANP).
    pub fixed_indistinct: bool,
    pub style: NumberingStyle,
    /// Digits in the leading display group for [`NumberingStyle::TrunkBlock`].
    pub leading_group: usize,
}

pub const REGIONS: &[RegionMetadata] = &[
    RegionMetadata {
        region: "US",
        calling_code: 1,
        national_lengths: &[10],
        trunk_prefix: None,
        mobile_prefixes: &[],
        pager_prefixes: &[],
        voicemail_prefixes: &[],
        fixed_indistinct: true,
        style: NumberingStyle::Nanp,
        leading_group: 3,
    },
    RegionMetadata {
        region: "CA",
        calling_code: 1,
        national_lengths: &[10],
        trunk_prefix: None,
        mobile_prefixes: &[],
        pager_prefixes: &[],
        voicemail_prefixes: &[],
        fixed_indistinct: true,
        style: NumberingStyle::Nanp,
        leading_group: 3,
    },
    RegionMetadata {
        region: "GB",
        calling_code: 44,
        national_lengths: &[9, 10],
        trunk_prefix: Some('0'),
        // 076 is the UK paging range; order matters, pager wins over the
        // generic mobile prefix.
        mobile_prefixes: &["7"],
        pager_prefixes: &["76"],
        voicemail_prefixes: &[],
        fixed_indistinct: false,
        style: NumberingStyle::TrunkBlock,
        leading_group: 4,
    },
    RegionMetadata {
        region: "FR",
        calling_code: 33,
        national_lengths: &[9],
        trunk_prefix: Some('0'),
        mobile_prefixes: &["6", "7"],
        pager_prefixes: &[],
        voicemail_prefixes: &[],
        fixed_indistinct: false,
        style: NumberingStyle::PairedBlocks,
        leading_group: 1,
    },
    RegionMetadata {
        region: "NL",
        calling_code: 31,
        national_lengths: &[9],
        trunk_prefix: Some('0'),
        mobile_prefixes: &["6"],
        pager_prefixes: &["66"],
        voicemail_prefixes: &[],
        fixed_indistinct: false,
        style: NumberingStyle::TrunkBlock,
        leading_group: 1,
    },
    RegionMetadata {
        region: "DE",
        calling_code: 49,
        national_lengths: &[10, 11],
        trunk_prefix: Some('0'),
        mobile_prefixes: &["15", "16", "17"],
        pager_prefixes: &[],
        voicemail_prefixes: &[],
        fixed_indistinct: false,
        style: NumberingStyle::TrunkBlock,
        leading_group: 3,
    },
];

/// Metadata for a two-letter region code, case-insensitive.
pub fn region_metadata(region: &str) -> Option<&'static RegionMetadata> {
    REGIONS.iter().find(|r| r.region.eq_ignore_ascii_case(region))
}

/// Resolve a calling code to a region, preferring `preferred` when it shares
/// the code (the NANP code 1 is shared; a Canadian default region keeps
/// Canadian numbers Canadian).
pub fn region_for_calling_code(
    calling_code: u16,
    preferred: Option<&str>,
) -> Option<&'static RegionMetadata> {
    if let Some(region) = preferred.and_then(region_metadata)
        && region.calling_code == calling_code
    {
        return Some(region);
    }
    REGIONS.iter().find(|r| r.calling_code == calling_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(region_metadata("us").unwrap().calling_code, 1);
        assert!(region_metadata("XX").is_none());
    }

    #[test]
    fn shared_calling_code_prefers_default_region() {
        assert_eq!(region_for_calling_code(1, Some("CA")).unwrap().region, "CA");
        assert_eq!(region_for_calling_code(1, None).unwrap().region, "US");
        assert_eq!(region_for_calling_code(33, Some("CA")).unwrap().region, "FR");
    }
}
