/// Resolved metadata describing how to consolidate change events into a table.
///
/// A descriptor is created fresh per change event and handed straight to the
/// downstream SQL-merge executor, which matches rows on `primary_key_columns`,
/// breaks recency ties with `ordering_columns` and filters soft-deleted rows via
/// `soft_delete_column`.
///
/// Descriptors are only emitted with a non-empty `primary_key_columns`; events for
/// which no primary keys resolve degrade to append-only persistence instead.
/// `ordering_columns` may be empty, in which case the executor cannot break ties
/// and consolidation quality degrades, but merging still happens.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeDescriptor {
    /// Columns uniquely identifying a logical row across its change events
    pub primary_key_columns: Vec<String>,
    /// Columns deciding which change event for a given key is most recent
    pub ordering_columns: Vec<String>,
    /// Column marking a row as soft-deleted
    pub soft_delete_column: &'static str,
    /// Fully resolved `<dataset>.<table>` reference of the staging table
    pub staging_table: String,
    /// Fully resolved `<dataset>.<table>` reference of the replica table
    pub replica_table: String,
    /// Columns participating in the consolidation, in destination schema order
    pub merge_columns: Vec<String>,
}
