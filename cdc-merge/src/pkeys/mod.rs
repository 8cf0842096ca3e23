//! Source table primary key caching.

mod cache;

pub use cache::*;
