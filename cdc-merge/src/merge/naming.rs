//! Destination name templating and sanitization.
//!
//! Destination datasets and tables are configured as templates that may reference
//! any field of the change row with `{field}` placeholders. Dataset and table
//! fragments are resolved independently, joined as `<dataset>.<table>` and then
//! sanitized so the result is a valid destination table identifier.

use crate::bail;
use crate::error::{ErrorKind, MergeResult};
use crate::types::ChangeRow;

/// Character reserved by the templating syntax.
///
/// Every occurrence surviving substitution is replaced with an underscore in the
/// final table reference.
pub const TEMPLATE_MARKER: char = '$';

/// Substitutes `{field}` placeholders in a template with values from the row.
///
/// Non-placeholder text passes through verbatim. A placeholder referencing a field
/// absent from the row fails with [`ErrorKind::TemplateFieldMissing`]; an opening
/// brace without a closing one fails with [`ErrorKind::InvalidDestinationTable`].
pub fn format_template(template: &str, row: &ChangeRow) -> MergeResult<String> {
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            bail!(
                ErrorKind::InvalidDestinationTable,
                "Destination name template has an unterminated placeholder",
                format!("template: {template}")
            );
        };

        let field = &after[..end];
        let Some(value) = row.get(field) else {
            bail!(
                ErrorKind::TemplateFieldMissing,
                "Destination name template references a field absent from the row",
                format!("field: {field}, template: {template}")
            );
        };

        resolved.push_str(&value.to_template_value());
        rest = &after[end + 1..];
    }

    resolved.push_str(rest);

    Ok(resolved)
}

/// Joins two resolved name fragments into a sanitized `<dataset>.<table>` reference.
///
/// Every [`TEMPLATE_MARKER`] left in either fragment becomes an underscore so the
/// reference stays a valid destination table identifier.
pub fn build_table_ref(dataset: &str, table: &str) -> String {
    format!("{dataset}.{table}").replace(TEMPLATE_MARKER, "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn row() -> ChangeRow {
        ChangeRow::new(vec![
            ("_metadata_schema".to_string(), Cell::from("sales")),
            ("_metadata_table".to_string(), Cell::from("orders")),
            ("shard".to_string(), Cell::I64(4)),
        ])
    }

    #[test]
    fn plain_text_passes_through_verbatim() {
        assert_eq!(format_template("staging", &row()).unwrap(), "staging");
        assert_eq!(format_template("", &row()).unwrap(), "");
    }

    #[test]
    fn placeholders_are_substituted_in_order() {
        let resolved =
            format_template("{_metadata_schema}_{_metadata_table}_{shard}", &row()).unwrap();

        assert_eq!(resolved, "sales_orders_4");
    }

    #[test]
    fn absent_field_fails_with_template_field_missing() {
        let error = format_template("{no_such_field}", &row()).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TemplateFieldMissing);
        assert!(error.detail().unwrap().contains("no_such_field"));
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        let error = format_template("{_metadata_schema", &row()).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidDestinationTable);
    }

    #[test]
    fn stray_closing_brace_is_literal_text() {
        assert_eq!(format_template("a}b", &row()).unwrap(), "a}b");
    }

    #[test]
    fn build_table_ref_joins_and_sanitizes() {
        assert_eq!(build_table_ref("sales", "orders"), "sales.orders");
        assert_eq!(
            build_table_ref("sales$staging", "orders$log$1"),
            "sales_staging.orders_log_1"
        );
    }

    #[test]
    fn marker_coming_from_substituted_values_is_sanitized_too() {
        let row = ChangeRow::new(vec![(
            "_metadata_table".to_string(),
            Cell::from("orders$2024"),
        )]);

        let table = format_template("{_metadata_table}", &row).unwrap();
        assert_eq!(build_table_ref("staging", &table), "staging.orders_2024");
    }
}
