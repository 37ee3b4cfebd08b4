//! Run summary rendering.

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use crmnorm_model::NormalizationResult;

/// Consistent styling for all CLI tables.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Render the changed-record counts and any warnings.
pub fn render_summary(result: &NormalizationResult, dry_run: bool) -> String {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let changed = if dry_run { "Would change" } else { "Changed" };
    table.set_header(vec!["Category", changed]);
    table.add_row(vec!["Names".to_string(), result.names.len().to_string()]);
    table.add_row(vec!["Phones".to_string(), result.phones.len().to_string()]);
    table.add_row(vec![
        "Addresses".to_string(),
        result.addresses.len().to_string(),
    ]);

    let mut rendered = table.to_string();
    if !result.warnings.is_empty() {
        rendered.push_str(&format!("\n{} warning(s):\n", result.warnings.len()));
        for warning in &result.warnings {
            rendered.push_str(&format!("  - {warning}\n"));
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crmnorm_model::{AddressId, ContactId, NormalizeWarning};

    #[test]
    fn summary_counts_and_warnings() {
        let mut result = NormalizationResult::new();
        result.names.insert(ContactId(1));
        result.names.insert(ContactId(2));
        result.warnings.push(NormalizeWarning::PostalMismatch {
            address: AddressId(9),
            postal_code: "123".to_string(),
            country: "US".to_string(),
        });

        let rendered = render_summary(&result, true);
        assert!(rendered.contains("Would change"));
        assert!(rendered.contains("Names"));
        assert!(rendered.contains('2'));
        assert!(rendered.contains("1 warning(s)"));
        assert!(rendered.contains("postal code"));
    }
}
