//! Telemetry bootstrap for merge resolution services.
//!
//! Hosts install tracing and a Prometheus metrics recorder through this crate so
//! the resolver's fire-and-forget counters and structured logs become observable.

pub mod metrics;
pub mod tracing;
