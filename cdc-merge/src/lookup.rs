//! Seams to the external metadata services.
//!
//! The network clients that talk to the destination warehouse and to the stream
//! metadata service are collaborators of this crate, not part of it. The caches
//! only depend on these two traits; tests supply in-memory implementations.

use std::future::Future;

use crate::error::MergeResult;
use crate::types::{SourceTable, TableRef};

/// Trait for fetching the declared schema of a destination table.
///
/// Implementations should return the column names in declared schema order and fail
/// with [`crate::error::ErrorKind::SchemaLookupFailed`] when the table does not
/// exist in the destination. The returned value is treated as immutable for the
/// lifetime of a pipeline run.
pub trait SchemaLookup {
    /// Returns the ordered column names of the given destination table.
    fn table_columns(
        &self,
        table: &TableRef,
    ) -> impl Future<Output = MergeResult<Vec<String>>> + Send;
}

/// Trait for fetching the declared primary key columns of a source table.
///
/// An `Ok` result with an empty list is a successfully determined answer meaning
/// the table has no declared primary key, which is distinct from a failed fetch.
pub trait PrimaryKeyLookup {
    /// Returns the ordered primary key column names declared for the given table.
    fn primary_key_columns(
        &self,
        table: &SourceTable,
    ) -> impl Future<Output = MergeResult<Vec<String>>> + Send;
}
