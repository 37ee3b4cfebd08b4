//! Field-level diff between an original and a normalized record.

use std::collections::BTreeMap;

/// Changed fields: name -> (old value, new value). A `BTreeMap` keeps the
/// change-log output order deterministic.
pub type FieldDiff = BTreeMap<&'static str, (Option<String>, Option<String>)>;

/// Compare two field projections key-wise.
///
/// Only keys present on both sides participate, and each key is compared
/// against itself — two different fields sharing a value are never
/// conflated, and a change is never masked because the new value happens to
/// equal some other field's old value.
pub fn diff_fields(
    original: &[(&'static str, Option<String>)],
    normalized: &[(&'static str, Option<String>)],
) -> FieldDiff {
    let normalized_by_key: BTreeMap<&'static str, &Option<String>> = normalized
        .iter()
        .map(|(key, value)| (*key, value))
        .collect();

    original
        .iter()
        .filter_map(|(key, old)| {
            let new = normalized_by_key.get(key)?;
            if *new == old {
                None
            } else {
                Some((*key, (old.clone(), (*new).clone())))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        pairs
            .iter()
            .map(|(key, value)| (*key, Some((*value).to_string())))
            .collect()
    }

    #[test]
    fn equal_values_never_appear() {
        let original = fields(&[("first_name", "Ada"), ("last_name", "Lovelace")]);
        let diff = diff_fields(&original, &original);
        assert!(diff.is_empty());
    }

    #[test]
    fn changed_field_is_reported_with_both_values() {
        let original = fields(&[("first_name", "ada"), ("last_name", "Lovelace")]);
        let normalized = fields(&[("first_name", "Ada"), ("last_name", "Lovelace")]);
        let diff = diff_fields(&original, &normalized);
        assert_eq!(diff.len(), 1);
        assert_eq!(
            diff["first_name"],
            (Some("ada".to_string()), Some("Ada".to_string()))
        );
    }

    #[test]
    fn comparison_is_per_key_not_by_value_set() {
        // first_name's new value equals middle_name's old value; a value-set
        // diff would miss the change entirely.
        let original = fields(&[("first_name", "jean"), ("middle_name", "Jean")]);
        let normalized = fields(&[("first_name", "Jean"), ("middle_name", "Jean")]);
        let diff = diff_fields(&original, &normalized);
        assert_eq!(diff.len(), 1);
        assert!(diff.contains_key("first_name"));
        assert!(!diff.contains_key("middle_name"));
    }

    #[test]
    fn key_order_does_not_matter() {
        let original_a = fields(&[("a", "1"), ("b", "2")]);
        let original_b = fields(&[("b", "2"), ("a", "1")]);
        let normalized = fields(&[("b", "2"), ("a", "one")]);
        assert_eq!(
            diff_fields(&original_a, &normalized),
            diff_fields(&original_b, &normalized)
        );
    }

    #[test]
    fn keys_missing_on_either_side_are_ignored() {
        let original = fields(&[("a", "1"), ("only_old", "x")]);
        let normalized = fields(&[("a", "2"), ("only_new", "y")]);
        let diff = diff_fields(&original, &normalized);
        assert_eq!(diff.len(), 1);
        assert!(diff.contains_key("a"));
    }

    #[test]
    fn none_to_value_counts_as_change() {
        let original = vec![("phone_type_id", None)];
        let normalized = vec![("phone_type_id", Some("1".to_string()))];
        let diff = diff_fields(&original, &normalized);
        assert_eq!(diff["phone_type_id"], (None, Some("1".to_string())));
    }
}
