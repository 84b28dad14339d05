//! Metrics collection and Prometheus export.
//!
//! Installs the global recorder and renders the /metrics payload. Request
//! level counters come from `service_core::middleware::metrics_middleware`;
//! the counters here track what the API does with the store.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Call once at startup, before anything is
/// recorded; a second call returns an error.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics recorder already initialized"))
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_user_registered() {
    counter!("profile_users_registered_total").increment(1);
}

pub fn record_goal_registered() {
    counter!("profile_goals_registered_total").increment(1);
}

/// `operation` must be a fixed description, never an id.
pub fn record_store_error(operation: &'static str) {
    counter!("profile_store_errors_total", "operation" => operation).increment(1);
}
