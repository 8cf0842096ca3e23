//! Merge descriptor resolution.
//!
//! Turns a [`crate::types::ChangeEvent`] into zero or one [`MergeDescriptor`] by
//! consulting the schema and primary key caches, applying source-type ordering
//! rules and resolving the templated destination names.

mod descriptor;
pub mod naming;
mod resolver;

pub use descriptor::*;
pub use resolver::*;
