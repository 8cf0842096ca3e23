use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{ErrorKind, MergeResult};
use crate::lookup::{PrimaryKeyLookup, SchemaLookup};
use crate::merge_error;
use crate::types::{SourceTable, TableRef};

/// In-memory [`SchemaLookup`] with a fetch counter.
///
/// Tables not added via [`InMemorySchemaLookup::with_table`] fail the lookup the
/// way a destination would for a missing table. Clones share state so tests can
/// keep a handle for assertions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaLookup {
    inner: Arc<SchemaLookupInner>,
}

#[derive(Debug, Default)]
struct SchemaLookupInner {
    tables: Mutex<HashMap<TableRef, Vec<String>>>,
    fetches: AtomicUsize,
}

impl InMemorySchemaLookup {
    /// Creates a lookup that knows no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table with the given ordered column names.
    pub fn with_table(self, table: TableRef, columns: Vec<String>) -> Self {
        self.inner.tables.lock().unwrap().insert(table, columns);
        self
    }

    /// Returns how many fetches the lookup has served, successful or not.
    pub fn fetches(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }
}

impl SchemaLookup for InMemorySchemaLookup {
    async fn table_columns(&self, table: &TableRef) -> MergeResult<Vec<String>> {
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);

        let tables = self.inner.tables.lock().unwrap();
        tables.get(table).cloned().ok_or_else(|| {
            merge_error!(
                ErrorKind::SchemaLookupFailed,
                "Table does not exist in the destination",
                table.to_string()
            )
        })
    }
}

/// In-memory [`PrimaryKeyLookup`] with a fetch counter.
///
/// Tables must be configured explicitly: [`InMemoryPrimaryKeyLookup::with_keys`]
/// with an empty list models a confirmed lack of declared keys, while
/// [`InMemoryPrimaryKeyLookup::with_failure`] and unknown tables model a failing
/// metadata service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrimaryKeyLookup {
    inner: Arc<PrimaryKeyLookupInner>,
}

#[derive(Debug, Default)]
struct PrimaryKeyLookupInner {
    keys: Mutex<HashMap<SourceTable, Vec<String>>>,
    failing: Mutex<HashSet<SourceTable>>,
    fetches: AtomicUsize,
}

impl InMemoryPrimaryKeyLookup {
    /// Creates a lookup that knows no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table with the given declared primary key columns.
    pub fn with_keys(self, table: SourceTable, columns: Vec<String>) -> Self {
        self.inner.keys.lock().unwrap().insert(table, columns);
        self
    }

    /// Makes lookups for the given table fail.
    pub fn with_failure(self, table: SourceTable) -> Self {
        self.inner.failing.lock().unwrap().insert(table);
        self
    }

    /// Returns how many fetches the lookup has served, successful or not.
    pub fn fetches(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }
}

impl PrimaryKeyLookup for InMemoryPrimaryKeyLookup {
    async fn primary_key_columns(&self, table: &SourceTable) -> MergeResult<Vec<String>> {
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);

        if self.inner.failing.lock().unwrap().contains(table) {
            return Err(merge_error!(
                ErrorKind::PrimaryKeyLookupFailed,
                "Stream metadata service request failed",
                table.to_string()
            ));
        }

        let keys = self.inner.keys.lock().unwrap();
        keys.get(table).cloned().ok_or_else(|| {
            merge_error!(
                ErrorKind::PrimaryKeyLookupFailed,
                "No stream metadata available for table",
                table.to_string()
            )
        })
    }
}
