use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Cache for the installed recorder handle. A [`Mutex<Option<..>>`] rather than a
// `OnceLock` because installation is fallible and `get_or_try_init` is unstable.
// Installing a second global recorder fails, and tests initialize repeatedly, so
// later calls must get the cached handle back instead.
static PROMETHEUS_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// Interval at which recorder upkeep runs to bound metrics memory.
const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Port the standalone metrics endpoint listens on.
const METRICS_PORT: u16 = 9000;

/// Installs the Prometheus recorder and returns a handle for rendering.
///
/// For hosts that serve `/metrics` from their own HTTP framework: no listener is
/// started, the caller renders the returned [`PrometheusHandle`] wherever it wants.
/// Safe to call from multiple threads; installation happens once and later calls
/// return clones of the cached handle.
pub fn init_metrics_handle() -> Result<PrometheusHandle, BuildError> {
    let mut prometheus_handle = PROMETHEUS_HANDLE.lock().unwrap();

    if let Some(handle) = &*prometheus_handle {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    *prometheus_handle = Some(handle.clone());

    let upkeep_handle = handle.clone();

    // Periodic upkeep keeps histogram buffers from growing without bound.
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(UPKEEP_INTERVAL).await;
            ::tracing::trace!("running metrics upkeep");
            upkeep_handle.run_upkeep();
        }
    });

    Ok(handle)
}

/// Installs the Prometheus recorder with its own HTTP listener on port 9000.
///
/// For standalone services without an HTTP framework: the exporter scrapes at
/// `[::]:9000/metrics`. The optional service name is attached to every metric as a
/// global `service` label. Must be called inside a Tokio runtime.
pub fn init_metrics(service: Option<&str>) -> Result<(), BuildError> {
    let mut builder = PrometheusBuilder::new().with_http_listener(SocketAddr::new(
        IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        METRICS_PORT,
    ));

    if let Some(service) = service {
        builder = builder.add_global_label("service", service);
    }

    builder.install()?;

    Ok(())
}
