//! Access token acquisition.

use crate::config::ClientConfig;
use crate::errors::ClientError;
use async_trait::async_trait;
use common::jwt::decode_claims_unverified;
use tracing::instrument;

/// Source of access tokens for joining a session.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self, identity: &str) -> Result<String, ClientError>;
}

/// Fetches tokens from the token server's `GET /token` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    client: reqwest::Client,
    token_url: String,
}

impl HttpTokenSource {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.token_request_timeout)
            .build()?;

        Ok(Self {
            client,
            token_url: format!("{}/token", config.token_server_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    #[instrument(skip_all, name = "session.token.fetch")]
    async fn fetch_token(&self, identity: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .get(&self.token_url)
            .query(&[("identity", identity)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Network(format!(
                "token server responded with {status}"
            )));
        }

        let token = response.text().await?;

        // Not verifiable here; only the platform holds the signing secret
        let claims = decode_claims_unverified(&token).map_err(|e| {
            ClientError::Network(format!("token server returned an unusable token: {e}"))
        })?;

        tracing::debug!(
            target: "session.token",
            expires_at = claims.exp,
            lifetime_seconds = claims.lifetime_seconds(),
            "Received access token"
        );

        Ok(token)
    }
}
