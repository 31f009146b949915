use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Credential selection failures. Fatal to the request that hit them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("No configuration profile registered for environment: {0}")]
    NoConfigurationProfile(String),
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Identity is required")]
    MissingIdentity,

    #[error("Signing error: {0}")]
    Signing(String),
}

impl TokenError {
    /// Bounded label for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            TokenError::Configuration(ConfigurationError::UnknownEnvironment(_)) => {
                "unknown_environment"
            }
            TokenError::Configuration(ConfigurationError::NoConfigurationProfile(_)) => {
                "no_configuration_profile"
            }
            TokenError::MissingIdentity => "missing_identity",
            TokenError::Signing(_) => "signing",
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            TokenError::Configuration(ConfigurationError::UnknownEnvironment(env)) => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_ENVIRONMENT",
                format!("Unknown environment: {}", env),
            ),
            TokenError::Configuration(ConfigurationError::NoConfigurationProfile(env)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "NO_CONFIGURATION_PROFILE",
                format!("No configuration profile is registered for {}", env),
            ),
            TokenError::MissingIdentity => (
                StatusCode::BAD_REQUEST,
                "MISSING_IDENTITY",
                "An identity is required".to_string(),
            ),
            TokenError::Signing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SIGNING_ERROR",
                "An internal signing error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
