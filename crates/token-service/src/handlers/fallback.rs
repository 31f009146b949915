//! Static assets and the catch-all redirect.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, get_service, MethodRouter},
};
use std::path::PathBuf;
use tower_http::services::ServeDir;

/// Where unmatched GET requests are sent.
pub const INDEX_PATH: &str = "/index.html";

pub async fn redirect_to_index() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, INDEX_PATH)])
}

/// Build the fallback for unmatched paths.
///
/// Each directory is tried in order; a miss falls through to the next one
/// and finally to the redirect.
pub fn static_fallback(dirs: &[PathBuf]) -> MethodRouter {
    dirs.iter().rev().fold(get(redirect_to_index), |fallback, dir| {
        get_service(ServeDir::new(dir).fallback(fallback))
    })
}
