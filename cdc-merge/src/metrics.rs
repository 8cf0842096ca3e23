//! Metrics definitions for merge resolution monitoring.

use metrics::describe_counter;

/// Label for the source schema name in metrics.
pub const SCHEMA_LABEL: &str = "schema";

/// Label for the source table name in metrics.
pub const TABLE_LABEL: &str = "table";

/// Label for the skip reason in metrics.
pub const REASON_LABEL: &str = "reason";

/// Counter for events whose merge-based consolidation was foregone.
pub const MERGE_FOREGONE_TOTAL: &str = "merge_foregone_total";

/// Counter for events skipped at the per-event resolution boundary.
pub const MERGE_EVENTS_SKIPPED_TOTAL: &str = "merge_events_skipped_total";

/// Registers descriptions for all counters emitted by this crate.
///
/// Purely cosmetic for exporters that surface metadata; emission works without it.
pub fn register_metrics() {
    describe_counter!(
        MERGE_FOREGONE_TOTAL,
        "Events for which merge-based consolidation was foregone because no primary keys could be resolved"
    );
    describe_counter!(
        MERGE_EVENTS_SKIPPED_TOTAL,
        "Events skipped entirely because they could not be resolved into a merge descriptor"
    );
}
