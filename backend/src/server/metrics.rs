//! Prometheus middleware construction.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

const NAMESPACE: &str = "homework";
const ENDPOINT: &str = "/metrics";

/// Build the request metrics middleware serving `GET /metrics`.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the collectors cannot be registered.
pub(crate) fn make_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}
