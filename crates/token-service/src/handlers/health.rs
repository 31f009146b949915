//! Liveness endpoint.

/// Returns "OK" while the process is serving requests.
///
/// The service has no external dependencies, so there is no separate
/// readiness check.
pub async fn health_check() -> &'static str {
    "OK"
}
