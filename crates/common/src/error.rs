//! Common error types for the video session demo components.

use thiserror::Error;

/// Common errors that can occur across components
#[derive(Error, Debug)]
pub enum DemoError {
    /// Network transport error (data track send, SDK channel closed)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DemoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using `DemoError`
pub type Result<T> = std::result::Result<T, DemoError>;
