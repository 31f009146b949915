//! Metrics definitions for the token service.
//!
//! Prometheus naming: `_total` suffix for counters, `_seconds` suffix for
//! duration histograms.
//!
//! # Cardinality
//!
//! - `environment`: bounded by the credentials file; requests naming an
//!   unconfigured environment are recorded as `unknown`
//! - `status`: `success` or an error category from `TokenError::category`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder and return a handle for `/metrics`.
///
/// # Errors
///
/// Fails if a global recorder is already installed.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        // Signing is local CPU work; anything past a few ms is an outlier
        .set_buckets_for_metric(
            Matcher::Prefix("token_issuance".to_string()),
            &[
                0.0005, 0.001, 0.0025, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250,
            ],
        )
        .map_err(|e| format!("Failed to set token issuance buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus metrics recorder: {e}"))
}

/// Record token issuance duration and outcome
///
/// Metrics: `token_issuance_duration_seconds`, `token_issuance_total`
/// Labels: `environment`, `status`
pub fn record_token_issuance(environment: &str, status: &str, duration: Duration) {
    histogram!("token_issuance_duration_seconds", "environment" => environment.to_string(), "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("token_issuance_total", "environment" => environment.to_string(), "status" => status.to_string())
        .increment(1);
}
