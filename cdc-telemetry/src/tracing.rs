use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error returned when the tracing subscriber cannot be installed.
#[derive(Debug, Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TracingInitError(String);

/// Installs a process-wide fmt subscriber filtered by `RUST_LOG`.
///
/// Falls back to the `info` level when no filter is configured in the
/// environment. Fails when a global subscriber is already installed.
pub fn init_tracing(service: &str) -> Result<(), TracingInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|source| TracingInitError(source.to_string()))?;

    ::tracing::info!(service, "tracing initialized");

    Ok(())
}
