use crate::errors::TokenError;
use crate::models::TokenRequest;
use crate::observability::{hash_for_correlation, record_token_issuance};
use crate::routes::AppState;
use crate::services::token_service;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Handle an access token request
///
/// GET /token?identity=..&env=..&ttl=..&configurationProfileSid=..
///
/// Unrecognised query parameters are ignored. The token is returned as the
/// plain-text body.
#[instrument(
    skip_all,
    name = "token.issue",
    fields(environment, identity_hash, status)
)]
pub async fn handle_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, TokenError> {
    let start = Instant::now();
    let request = TokenRequest::from_query(&query, &state.config.default_environment);

    let span = tracing::Span::current();
    span.record("environment", request.environment.as_str());
    if let Some(identity) = request.identity.as_deref() {
        span.record("identity_hash", hash_for_correlation(identity).as_str());
    }

    let result = token_service::issue_for_request(&state.config, &request);

    let status = match &result {
        Ok(_) => "success",
        Err(e) => e.category(),
    };
    span.record("status", status);

    let environment_label = if state.config.credentials.contains(&request.environment) {
        request.environment.as_str()
    } else {
        "unknown"
    };
    record_token_issuance(environment_label, status, start.elapsed());

    match result {
        Ok(token) => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            token,
        )),
        Err(e) => {
            tracing::warn!(target: "token.handler", error = %e, "Token request rejected");
            Err(e)
        }
    }
}
