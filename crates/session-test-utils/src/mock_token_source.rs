//! Canned token source.

use async_trait::async_trait;
use session_client::token_client::TokenSource;
use session_client::ClientError;
use std::sync::{Arc, Mutex};

/// Returns a fixed token, always fails, or never answers. Records requested
/// identities.
#[derive(Debug, Clone)]
pub struct MockTokenSource {
    outcome: Result<String, String>,
    unresponsive: bool,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockTokenSource {
    #[must_use]
    pub fn returning(token: impl Into<String>) -> Self {
        Self {
            outcome: Ok(token.into()),
            unresponsive: false,
            requests: Arc::default(),
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            unresponsive: false,
            requests: Arc::default(),
        }
    }

    /// A token server that accepts the request and never responds.
    #[must_use]
    pub fn unresponsive() -> Self {
        Self {
            outcome: Err("no response".to_string()),
            unresponsive: true,
            requests: Arc::default(),
        }
    }

    /// Identities tokens were requested for, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenSource for MockTokenSource {
    async fn fetch_token(&self, identity: &str) -> Result<String, ClientError> {
        self.requests.lock().unwrap().push(identity.to_string());
        if self.unresponsive {
            std::future::pending::<()>().await;
        }
        self.outcome.clone().map_err(ClientError::Network)
    }
}
