use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::lookup::PrimaryKeyLookup;
use crate::types::SourceTable;

/// Internal storage for primary key cache data.
#[derive(Debug)]
struct Inner {
    primary_keys: HashMap<SourceTable, Option<Arc<Vec<String>>>>,
}

/// Thread-safe read-through cache of declared primary keys.
///
/// Maps a [`SourceTable`] to its declared primary key columns, fetching through the
/// configured [`PrimaryKeyLookup`] on a cold key. The cached value is nullable:
/// `None` records a failed fetch (logged once at the fetch boundary here), while
/// `Some` of an empty list records the confirmed absence of a declared primary key.
///
/// Unlike [`crate::schema::SchemaCache`], a failed fetch is not an error for the
/// caller. The resolver folds `None` into its empty-key fallback path, because
/// events for a table without resolvable keys can still be persisted append-only
/// downstream. Failed fetches are cached and not retried at this layer; retry
/// policy belongs to the external service client.
#[derive(Debug)]
pub struct PrimaryKeyCache<L> {
    lookup: Arc<L>,
    inner: Arc<Mutex<Inner>>,
}

impl<L> Clone for PrimaryKeyCache<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: self.lookup.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<L> PrimaryKeyCache<L>
where
    L: PrimaryKeyLookup,
{
    /// Creates a new empty primary key cache backed by the given lookup.
    pub fn new(lookup: L) -> Self {
        let inner = Inner {
            primary_keys: HashMap::new(),
        };

        Self {
            lookup: Arc::new(lookup),
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns the declared primary key columns of the given table.
    ///
    /// `None` means the lookup failed, now or on an earlier event for the same
    /// table. Concurrent cold misses may duplicate the fetch; the last write wins.
    /// The map mutex is never held across the fetch.
    pub async fn get(&self, table: &SourceTable) -> Option<Arc<Vec<String>>> {
        if let Some(entry) = self.inner.lock().await.primary_keys.get(table) {
            return entry.clone();
        }

        let entry = match self.lookup.primary_key_columns(table).await {
            Ok(columns) => {
                debug!(table = %table, columns = columns.len(), "cached declared primary keys");
                Some(Arc::new(columns))
            }
            Err(error) => {
                warn!(
                    stream = %table.stream,
                    schema = %table.schema,
                    table = %table.table,
                    %error,
                    "primary key lookup failed, events for this table fall back to append-only handling"
                );
                None
            }
        };

        let mut inner = self.inner.lock().await;
        inner.primary_keys.insert(table.clone(), entry.clone());

        entry
    }

    /// Adds the primary key columns of a table to the cache without fetching.
    ///
    /// Replaces any existing entry for the same table.
    pub async fn add_primary_keys(&self, table: SourceTable, columns: Vec<String>) {
        let mut inner = self.inner.lock().await;
        inner.primary_keys.insert(table, Some(Arc::new(columns)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::InMemoryPrimaryKeyLookup;

    fn orders_source() -> SourceTable {
        SourceTable::new("stream-1", "sales", "orders")
    }

    #[tokio::test]
    async fn declared_keys_are_cached_after_the_first_fetch() {
        let lookup = InMemoryPrimaryKeyLookup::new()
            .with_keys(orders_source(), vec!["order_id".to_string()]);
        let cache = PrimaryKeyCache::new(lookup.clone());

        let first = cache.get(&orders_source()).await.unwrap();
        let second = cache.get(&orders_source()).await.unwrap();

        assert_eq!(first.as_slice(), ["order_id"]);
        assert_eq!(second, first);
        assert_eq!(lookup.fetches(), 1);
    }

    #[tokio::test]
    async fn confirmed_absence_of_keys_is_not_a_failure() {
        let lookup = InMemoryPrimaryKeyLookup::new().with_keys(orders_source(), Vec::new());
        let cache = PrimaryKeyCache::new(lookup);

        let keys = cache.get(&orders_source()).await;
        assert!(matches!(keys, Some(columns) if columns.is_empty()));
    }

    #[tokio::test]
    async fn failed_fetches_are_cached_as_none() {
        let lookup = InMemoryPrimaryKeyLookup::new().with_failure(orders_source());
        let cache = PrimaryKeyCache::new(lookup.clone());

        assert_eq!(cache.get(&orders_source()).await, None);
        assert_eq!(cache.get(&orders_source()).await, None);
        // The failure was recorded, later events do not re-fetch.
        assert_eq!(lookup.fetches(), 1);
    }

    #[tokio::test]
    async fn prewarmed_entries_skip_the_lookup() {
        let lookup = InMemoryPrimaryKeyLookup::new();
        let cache = PrimaryKeyCache::new(lookup.clone());

        cache
            .add_primary_keys(orders_source(), vec!["order_id".to_string()])
            .await;

        let keys = cache.get(&orders_source()).await.unwrap();
        assert_eq!(keys.as_slice(), ["order_id"]);
        assert_eq!(lookup.fetches(), 0);
    }
}
