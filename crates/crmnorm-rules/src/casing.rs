//! Shared casing primitives.

/// First character uppercased, the rest left untouched.
pub(crate) fn ucfirst(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the text, then capitalize the first letter of each
/// space-separated word. Runs of spaces survive unchanged.
pub(crate) fn title_case_words(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(ucfirst)
        .collect::<Vec<_>>()
        .join(" ")
}
