use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TOKEN_SERVER_URL: &str = "http://localhost:3000";

/// Log level handed to the SDK when joining.
pub const DEFAULT_SDK_LOG_LEVEL: &str = "debug";

pub const DEFAULT_TOKEN_REQUEST_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the token server, without a trailing slash.
    pub token_server_url: String,
    pub sdk_log_level: String,
    pub token_request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_server_url: DEFAULT_TOKEN_SERVER_URL.to_string(),
            sdk_log_level: DEFAULT_SDK_LOG_LEVEL.to_string(),
            token_request_timeout: Duration::from_secs(DEFAULT_TOKEN_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let token_server_url = vars
            .get("TOKEN_SERVER_URL")
            .filter(|v| !v.is_empty())
            .map_or(DEFAULT_TOKEN_SERVER_URL, String::as_str)
            .trim_end_matches('/')
            .to_string();

        let sdk_log_level = vars
            .get("SDK_LOG_LEVEL")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_SDK_LOG_LEVEL.to_string());

        let timeout_seconds = match vars.get("TOKEN_REQUEST_TIMEOUT_SECONDS") {
            None => DEFAULT_TOKEN_REQUEST_TIMEOUT_SECONDS,
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "TOKEN_REQUEST_TIMEOUT_SECONDS".to_string(),
                    value: value.clone(),
                })?,
        };

        Ok(Self {
            token_server_url,
            sdk_log_level,
            token_request_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}
