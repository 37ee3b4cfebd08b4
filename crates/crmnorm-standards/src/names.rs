//! Word classes and delimiter order for name casing.

/// Words conventionally kept lowercase inside a personal name. The list is
/// Individual-oriented; a handful of entries ("et", "and", "und") also show
/// up inside company names and are left alone there too.
pub const CONNECTORS: &[&str] = &[
    "de", "des", "la", // France
    "da", "den", "der", "ten", "ter", "van", // Netherlands
    "von", // Germany
    "et", "and", "und", // company names
    "dos", "das", "do", "du", // Portugal, France
    "s",
];

/// Minor words lowercased inside organization names.
pub const ORG_MINOR: &[&str] = &["of"];

/// Legal-entity suffixes rendered in full uppercase.
pub const ORG_STATUS_UPPER: &[&str] = &[
    "llc", "llp", "pllc", "lp", "pc", // USA
    "sa", "sarl", "sc", "sci", // France
    "fze", "fz", "fz-llc", "fz-co", "rak", // UAE
    "usa", "uae",
];

/// Legal-entity suffixes rewritten to their dotted abbreviation ("inc" and
/// friends render as "Inc.", never "INC").
pub const ORG_STATUS_DOTTED: &[&str] = &["inc", "co", "corp", "ltd"];

/// Delimiters applied as cumulative passes, in this order. Order is
/// semantic: each pass operates on the previous pass's output, so "Mc" only
/// matches after the first pass has capitalized it, and the space pass sees
/// every earlier capitalization.
pub const DELIMITERS: &[&str] = &["-", ".", "D'", "O'", "Mc", " "];

/// True when the lowercased token is a connector word.
pub fn is_connector(token: &str) -> bool {
    let lowered = token.to_lowercase();
    CONNECTORS.contains(&lowered.as_str())
}

/// True when the lowercased token is an organization minor word.
pub fn is_org_minor(token: &str) -> bool {
    let lowered = token.to_lowercase();
    ORG_MINOR.contains(&lowered.as_str())
}

/// Lowercased token with dots stripped, the key organization status words
/// are matched on ("l.l.c." matches "llc").
pub fn status_key(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|ch| *ch != '.')
        .collect()
}
