//! Destination table schema caching.

mod cache;

pub use cache::*;
