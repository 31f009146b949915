//! HTTP routes for the token service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use crate::observability::metrics::init_metrics_recorder;

/// Application state shared across all handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration, including the credential sets.
    pub config: Config,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/token` - Access token issuance
/// - `/health` - Liveness check
/// - `/metrics` - Prometheus metrics
/// - Static asset directories, then a 302 to `/index.html` for any other GET
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let fallback = handlers::static_fallback(&state.config.static_dirs);

    let api_routes = Router::new()
        .route("/token", get(handlers::handle_token))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // The last layer added wraps the others: TimeoutLayer is outermost and
    // bounds the traced request as a whole.
    api_routes
        .merge(metrics_routes)
        .fallback_service(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
