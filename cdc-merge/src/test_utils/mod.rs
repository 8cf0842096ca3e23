//! Test helpers for merge resolution.
//!
//! In-memory implementations of the lookup seams plus small builders for change
//! rows and events. Compiled for this crate's own tests and for downstream crates
//! via the `test-utils` feature.

mod event;
mod lookup;

pub use event::*;
pub use lookup::*;
