//! Common types used throughout the merge resolution engine.
//!
//! Re-exports destination and source table identifiers, row value types and the
//! change event type consumed by the resolver.

mod cell;
mod event;
mod row;
mod table;

pub use cell::*;
pub use event::*;
pub use row::*;
pub use table::*;
