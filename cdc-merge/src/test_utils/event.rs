use crate::types::{
    Cell, ChangeEvent, ChangeRow, SourceTable, TableRef, METADATA_SCHEMA, METADATA_SOURCE_TYPE,
    METADATA_STREAM, METADATA_TABLE,
};

/// Builds a change row from name and value pairs.
pub fn change_row(fields: Vec<(&str, Cell)>) -> ChangeRow {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Builds a well-formed change event for the given destination and source table.
///
/// The row carries the four required metadata fields followed by any extra source
/// columns.
pub fn change_event(
    table: TableRef,
    source: &SourceTable,
    source_type: &str,
    extra_fields: Vec<(String, Cell)>,
) -> ChangeEvent {
    let mut fields = vec![
        (METADATA_STREAM.to_string(), Cell::from(source.stream.as_str())),
        (METADATA_SCHEMA.to_string(), Cell::from(source.schema.as_str())),
        (METADATA_TABLE.to_string(), Cell::from(source.table.as_str())),
        (METADATA_SOURCE_TYPE.to_string(), Cell::from(source_type)),
    ];
    fields.extend(extra_fields);

    ChangeEvent::new(table, ChangeRow::new(fields))
}
