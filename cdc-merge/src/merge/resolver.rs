use metrics::counter;
use tracing::{error, warn};

use crate::config::DestinationConfig;
use crate::error::{MergeError, MergeResult};
use crate::lookup::{PrimaryKeyLookup, SchemaLookup};
use crate::merge::{naming, MergeDescriptor};
use crate::metrics::{
    MERGE_EVENTS_SKIPPED_TOTAL, MERGE_FOREGONE_TOTAL, REASON_LABEL, SCHEMA_LABEL, TABLE_LABEL,
};
use crate::pkeys::PrimaryKeyCache;
use crate::schema::SchemaCache;
use crate::types::{ChangeEvent, SourceTable, METADATA_DELETED, METADATA_ROW_ID};

/// Ordering columns for MySQL-family sources, in tie-break order.
pub const MYSQL_ORDER_BY_COLUMNS: &[&str] = &[
    "_metadata_timestamp",
    "_metadata_log_file",
    "_metadata_log_position",
];

/// Ordering columns for every other source, Oracle-family included.
pub const DEFAULT_ORDER_BY_COLUMNS: &[&str] = &["_metadata_timestamp", "_metadata_scn"];

/// Source type value selecting the MySQL ordering columns.
const MYSQL_SOURCE_TYPE: &str = "mysql";

/// Outcome of resolving a single change event.
///
/// Resolution never fails the stream: an event either yields a descriptor or is
/// skipped with an explicit reason that tests and operators can assert on.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The event resolved into a merge descriptor.
    Emitted(MergeDescriptor),
    /// The event was skipped and produces no descriptor.
    Skipped(SkipReason),
}

impl Resolution {
    /// Returns the emitted descriptor, if any.
    pub fn descriptor(&self) -> Option<&MergeDescriptor> {
        match self {
            Resolution::Emitted(descriptor) => Some(descriptor),
            Resolution::Skipped(_) => None,
        }
    }

    /// Consumes the resolution and returns the emitted descriptor, if any.
    pub fn into_descriptor(self) -> Option<MergeDescriptor> {
        match self {
            Resolution::Emitted(descriptor) => Some(descriptor),
            Resolution::Skipped(_) => None,
        }
    }

    /// Returns the skip reason, if the event was skipped.
    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Resolution::Emitted(_) => None,
            Resolution::Skipped(reason) => Some(reason),
        }
    }
}

/// Why a change event produced no merge descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No primary keys could be resolved for the table, so it degrades to
    /// append-only persistence downstream. This is an expected condition, not an
    /// error.
    NoPrimaryKeys {
        stream: String,
        schema: String,
        table: String,
    },
    /// The event could not be resolved at all: malformed metadata, a failed
    /// schema lookup or a broken destination name template.
    Unresolvable(MergeError),
}

/// Resolves change events into merge descriptors.
///
/// The resolver reads the process-wide schema and primary key caches, applies the
/// source-type ordering rules and resolves the templated destination names. It
/// holds no per-event mutable state and is cheap to clone, so many workers can
/// resolve events concurrently over shared caches. Events carry no ordering
/// requirement between each other; cross-event ordering semantics live entirely in
/// the emitted `ordering_columns`.
#[derive(Debug)]
pub struct MergeResolver<S, P> {
    schema_cache: SchemaCache<S>,
    pk_cache: PrimaryKeyCache<P>,
    destinations: DestinationConfig,
}

impl<S, P> Clone for MergeResolver<S, P> {
    fn clone(&self) -> Self {
        Self {
            schema_cache: self.schema_cache.clone(),
            pk_cache: self.pk_cache.clone(),
            destinations: self.destinations.clone(),
        }
    }
}

impl<S, P> MergeResolver<S, P>
where
    S: SchemaLookup + Send + Sync,
    P: PrimaryKeyLookup + Send + Sync,
{
    /// Creates a new resolver over the given caches and destination templates.
    pub fn new(
        schema_cache: SchemaCache<S>,
        pk_cache: PrimaryKeyCache<P>,
        destinations: DestinationConfig,
    ) -> Self {
        Self {
            schema_cache,
            pk_cache,
            destinations,
        }
    }

    /// Resolves one change event into zero or one merge descriptor.
    ///
    /// This is the per-event failure boundary: any error raised while resolving is
    /// logged together with the full row content and converted into
    /// [`SkipReason::Unresolvable`], isolating the failure to this event.
    pub async fn resolve(&self, event: &ChangeEvent) -> Resolution {
        match self.try_resolve(event).await {
            Ok(resolution) => resolution,
            Err(merge_error) => {
                error!(
                    row = %event.row(),
                    error = %merge_error,
                    "merge resolution failed, skipping merge for event"
                );
                counter!(MERGE_EVENTS_SKIPPED_TOTAL, REASON_LABEL => "unresolvable").increment(1);

                Resolution::Skipped(SkipReason::Unresolvable(merge_error))
            }
        }
    }

    async fn try_resolve(&self, event: &ChangeEvent) -> MergeResult<Resolution> {
        let source_table = event.source_table()?;
        let source_type = event.source_type()?;

        let merge_columns = self.schema_cache.get(event.table()).await?;
        let primary_key_columns = self
            .primary_key_columns(&source_table, &merge_columns)
            .await;

        if primary_key_columns.is_empty() {
            warn!(
                schema = %source_table.schema,
                table = %source_table.table,
                stream = %source_table.stream,
                "unable to resolve primary keys, not performing merge-based consolidation"
            );
            counter!(
                MERGE_FOREGONE_TOTAL,
                SCHEMA_LABEL => source_table.schema.clone(),
                TABLE_LABEL => source_table.table.clone()
            )
            .increment(1);

            let SourceTable {
                stream,
                schema,
                table,
            } = source_table;

            return Ok(Resolution::Skipped(SkipReason::NoPrimaryKeys {
                stream,
                schema,
                table,
            }));
        }

        let ordering_columns = ordering_columns_for(source_type);
        if ordering_columns.is_empty() {
            // Cannot happen with the static ordering table, handled anyway: unlike
            // missing primary keys, missing ordering columns only degrade the
            // consolidation, the descriptor is still emitted.
            warn!(
                schema = %source_table.schema,
                table = %source_table.table,
                stream = %source_table.stream,
                "unable to resolve ordering columns, merge consolidation cannot break recency ties"
            );
            counter!(
                MERGE_FOREGONE_TOTAL,
                SCHEMA_LABEL => source_table.schema.clone(),
                TABLE_LABEL => source_table.table.clone()
            )
            .increment(1);
        }

        let row = event.row();
        let staging_table = naming::build_table_ref(
            &naming::format_template(&self.destinations.staging_dataset, row)?,
            &naming::format_template(&self.destinations.staging_table, row)?,
        );
        let replica_table = naming::build_table_ref(
            &naming::format_template(&self.destinations.replica_dataset, row)?,
            &naming::format_template(&self.destinations.replica_table, row)?,
        );

        Ok(Resolution::Emitted(MergeDescriptor {
            primary_key_columns,
            ordering_columns: ordering_columns.iter().map(|c| c.to_string()).collect(),
            soft_delete_column: METADATA_DELETED,
            staging_table,
            replica_table,
            merge_columns: merge_columns.as_ref().clone(),
        }))
    }

    /// Resolves the primary key columns for the event's source table.
    ///
    /// A failed lookup was already reported at the fetch boundary and folds into
    /// the empty-key path here, so the synthetic row identity column can still
    /// salvage the merge when the destination schema carries it.
    async fn primary_key_columns(
        &self,
        source_table: &SourceTable,
        merge_columns: &[String],
    ) -> Vec<String> {
        let declared = self.pk_cache.get(source_table).await.unwrap_or_default();

        if declared.is_empty() && merge_columns.iter().any(|column| column == METADATA_ROW_ID) {
            return vec![METADATA_ROW_ID.to_string()];
        }

        declared.as_ref().clone()
    }
}

/// Returns the ordering columns for a source type.
fn ordering_columns_for(source_type: &str) -> &'static [&'static str] {
    if source_type == MYSQL_SOURCE_TYPE {
        MYSQL_ORDER_BY_COLUMNS
    } else {
        DEFAULT_ORDER_BY_COLUMNS
    }
}
