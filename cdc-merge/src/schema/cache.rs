use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::MergeResult;
use crate::lookup::SchemaLookup;
use crate::types::TableRef;

/// Internal storage for schema cache data.
///
/// Holds the cached column lists and is wrapped by [`SchemaCache`] for thread-safe
/// access.
#[derive(Debug)]
struct Inner {
    table_columns: HashMap<TableRef, Arc<Vec<String>>>,
}

/// Thread-safe read-through cache of destination table schemas.
///
/// Maps a [`TableRef`] to its ordered column names, fetching through the configured
/// [`SchemaLookup`] on a cold key. Entries are never evicted during a run because
/// the destination schema is treated as immutable for the pipeline's lifetime.
///
/// Concurrent cold misses on the same key may race and issue duplicate fetches; all
/// of them converge to the same externally-immutable value, so the cache takes no
/// per-key lock and lets the last write win. The map mutex is only ever held for
/// map access, never across a fetch.
#[derive(Debug)]
pub struct SchemaCache<L> {
    lookup: Arc<L>,
    inner: Arc<Mutex<Inner>>,
}

impl<L> Clone for SchemaCache<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<L> SchemaCache<L>
where
    L: SchemaLookup,
{
    /// Creates a new empty schema cache backed by the given lookup.
    pub fn new(lookup: L) -> Self {
        let inner = Inner {
            table_columns: HashMap::new(),
        };

        Self {
            lookup: Arc::new(lookup),
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns the ordered column names of the given table, fetching on a cold key.
    ///
    /// A failed fetch propagates to the caller and leaves no cache entry behind, so
    /// a later event for the same table retries the lookup.
    pub async fn get(&self, table: &TableRef) -> MergeResult<Arc<Vec<String>>> {
        if let Some(columns) = self.inner.lock().await.table_columns.get(table) {
            return Ok(columns.clone());
        }

        let columns = Arc::new(self.lookup.table_columns(table).await?);
        debug!(table = %table, columns = columns.len(), "cached destination table schema");

        let mut inner = self.inner.lock().await;
        inner.table_columns.insert(table.clone(), columns.clone());

        Ok(columns)
    }

    /// Adds the column names of a table to the cache without fetching.
    ///
    /// Replaces any existing entry for the same table. Useful for pre-warming the
    /// cache when schemas are known upfront.
    pub async fn add_table_columns(&self, table: TableRef, columns: Vec<String>) {
        let mut inner = self.inner.lock().await;
        inner.table_columns.insert(table, Arc::new(columns));
    }

    /// Returns the number of cached tables.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.table_columns.len()
    }

    /// Returns whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
