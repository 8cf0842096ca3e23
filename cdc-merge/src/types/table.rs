use std::fmt;

/// Fully qualified destination table reference.
///
/// Identifies a table in the destination warehouse by project, dataset and table
/// name. Compares by value and is used as the schema cache key.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TableRef {
    /// The project owning the dataset
    pub project: String,
    /// The dataset containing the table
    pub dataset: String,
    /// The name of the table within the dataset
    pub table: String,
}

impl TableRef {
    /// Creates a new [`TableRef`] with the given project, dataset and table name.
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> TableRef {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{0}.{1}.{2}",
            self.project, self.dataset, self.table
        ))
    }
}

/// Source-side table identity used to look up declared primary keys.
///
/// A table is identified by the stream replicating it together with its source
/// schema and table name, since the same schema and table names can appear in
/// multiple streams.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SourceTable {
    /// The name of the stream carrying the table's change events
    pub stream: String,
    /// The schema containing the table in the source database
    pub schema: String,
    /// The name of the table within the source schema
    pub table: String,
}

impl SourceTable {
    /// Creates a new [`SourceTable`] with the given stream, schema and table name.
    pub fn new(
        stream: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> SourceTable {
        Self {
            stream: stream.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{0}/{1}.{2}",
            self.stream, self.schema, self.table
        ))
    }
}
