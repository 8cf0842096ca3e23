use crate::error::{ErrorKind, MergeResult};
use crate::merge_error;
use crate::types::{ChangeRow, SourceTable, TableRef};

/// Row field naming the stream that produced the event.
pub const METADATA_STREAM: &str = "_metadata_stream";

/// Row field naming the source schema of the table.
pub const METADATA_SCHEMA: &str = "_metadata_schema";

/// Row field naming the source table.
pub const METADATA_TABLE: &str = "_metadata_table";

/// Row field naming the kind of source database the event came from.
pub const METADATA_SOURCE_TYPE: &str = "_metadata_source_type";

/// Synthetic row-identity column emitted for sources without a declared primary key.
pub const METADATA_ROW_ID: &str = "_metadata_row_id";

/// Column marking a row as soft-deleted in the destination.
pub const METADATA_DELETED: &str = "_metadata_deleted";

/// A single change-data-capture event addressed to a destination table.
///
/// Events are immutable once constructed. The ingestion layer guarantees that the
/// row contains the four required `_metadata_*` fields; the accessors on this type
/// surface their absence as a per-event error rather than panicking, since malformed
/// events must be skippable without affecting the rest of the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    table: TableRef,
    row: ChangeRow,
}

impl ChangeEvent {
    /// Creates a new change event for the given destination table.
    pub fn new(table: TableRef, row: ChangeRow) -> Self {
        Self { table, row }
    }

    /// Returns the destination table this event is addressed to.
    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// Returns the decoded row payload.
    pub fn row(&self) -> &ChangeRow {
        &self.row
    }

    /// Returns the name of the stream that produced this event.
    pub fn stream_name(&self) -> MergeResult<&str> {
        self.metadata_str(METADATA_STREAM)
    }

    /// Returns the source schema name of the table.
    pub fn schema_name(&self) -> MergeResult<&str> {
        self.metadata_str(METADATA_SCHEMA)
    }

    /// Returns the source table name.
    pub fn table_name(&self) -> MergeResult<&str> {
        self.metadata_str(METADATA_TABLE)
    }

    /// Returns the source database kind, e.g. `mysql` or `oracle`.
    pub fn source_type(&self) -> MergeResult<&str> {
        self.metadata_str(METADATA_SOURCE_TYPE)
    }

    /// Returns the source-side table identity used for primary key lookups.
    pub fn source_table(&self) -> MergeResult<SourceTable> {
        Ok(SourceTable::new(
            self.stream_name()?,
            self.schema_name()?,
            self.table_name()?,
        ))
    }

    /// Returns the string value of a required metadata field.
    ///
    /// An absent field is a [`ErrorKind::MissingMetadataField`] error, a present but
    /// non-string value a [`ErrorKind::MalformedEvent`] error. Both are caught at the
    /// per-event boundary.
    fn metadata_str(&self, field: &'static str) -> MergeResult<&str> {
        let Some(value) = self.row.get(field) else {
            return Err(merge_error!(
                ErrorKind::MissingMetadataField,
                "Required metadata field is missing from the change event row",
                format!("field: {field}")
            ));
        };

        value.as_str().ok_or_else(|| {
            merge_error!(
                ErrorKind::MalformedEvent,
                "Required metadata field holds a non-string value",
                format!("field: {field}, value: {value}")
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn event_with_row(fields: Vec<(&str, Cell)>) -> ChangeEvent {
        let row = fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();

        ChangeEvent::new(TableRef::new("project", "dataset", "orders"), row)
    }

    #[test]
    fn metadata_accessors_return_field_values() {
        let event = event_with_row(vec![
            (METADATA_STREAM, Cell::from("stream-1")),
            (METADATA_SCHEMA, Cell::from("sales")),
            (METADATA_TABLE, Cell::from("orders")),
            (METADATA_SOURCE_TYPE, Cell::from("oracle")),
        ]);

        assert_eq!(event.stream_name().unwrap(), "stream-1");
        assert_eq!(
            event.source_table().unwrap(),
            SourceTable::new("stream-1", "sales", "orders")
        );
        assert_eq!(event.source_type().unwrap(), "oracle");
    }

    #[test]
    fn missing_metadata_field_is_reported_as_such() {
        let event = event_with_row(vec![(METADATA_STREAM, Cell::from("stream-1"))]);

        let error = event.schema_name().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingMetadataField);
    }

    #[test]
    fn non_string_metadata_field_is_malformed() {
        let event = event_with_row(vec![(METADATA_STREAM, Cell::I64(3))]);

        let error = event.stream_name().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedEvent);
    }
}
