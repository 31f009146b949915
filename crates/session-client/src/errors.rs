use crate::state::SessionState;
use thiserror::Error;

/// Session client errors.
///
/// Every variant is terminal for the attempt that produced it; nothing is
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Token request failed: {0}")]
    Network(String),

    #[error("Session join failed: {0}")]
    SessionJoin(String),

    #[error("Connection attempt cancelled")]
    Cancelled,

    #[error("Local media unavailable: {0}")]
    LocalMedia(String),

    #[error("Cannot connect while {0}")]
    AlreadyActive(SessionState),

    #[error("Session controller is no longer running")]
    ControllerGone,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
