//! Street directional abbreviations.

use std::sync::LazyLock;

use regex::Regex;

/// Directional abbreviations re-uppercased after street title-casing.
pub const DIRECTIONALS: &[&str] = &["ne", "nw", "se", "sw"];

static DIRECTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(ne|nw|se|sw)\b").expect("directional pattern is valid")
});

/// Uppercase every whole-word directional abbreviation in the text,
/// regardless of its current case.
pub fn uppercase_directionals(text: &str) -> String {
    DIRECTIONAL_RE
        .replace_all(text, |caps: &regex::Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}
