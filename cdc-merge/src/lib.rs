//! Merge-descriptor resolution for CDC pipelines.
//!
//! For every change event keyed by a destination table, the resolver determines which
//! columns participate in consolidation, which columns identify a logical row, which
//! columns pick the most recent version of a row, and the fully resolved staging and
//! replica table names. The resulting [`merge::MergeDescriptor`] is handed to a
//! downstream SQL-merge executor.
//!
//! Ingestion adapters, wire-format decoding, the write sinks and the network clients
//! behind [`lookup::SchemaLookup`] and [`lookup::PrimaryKeyLookup`] live outside this
//! crate; only the caching and resolution policy around them is implemented here.

pub mod config;
pub mod error;
pub mod lookup;
mod macros;
pub mod merge;
pub mod metrics;
pub mod pkeys;
pub mod schema;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
