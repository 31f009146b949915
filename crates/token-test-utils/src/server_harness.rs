//! Test server harness for E2E testing
//!
//! Provides `TestTokenServer` for spawning real token server instances in tests.

use crate::credential_fixtures::test_config;
use std::net::SocketAddr;
use std::sync::Arc;
use token_service::config::Config;
use token_service::routes::{self, AppState};
use tokio::task::JoinHandle;

/// Test harness for spawning the token server in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_token_flow_e2e() -> Result<()> {
///     let server = TestTokenServer::spawn_default().await?;
///
///     let token = reqwest::get(format!("{}/token?identity=alice", server.url()))
///         .await?
///         .text()
///         .await?;
///
///     token.assert_valid_jwt().assert_identity("alice");
///     Ok(())
/// }
/// ```
pub struct TestTokenServer {
    addr: SocketAddr,
    config: Config,
    handle: JoinHandle<()>,
}

impl TestTokenServer {
    /// Spawn a server over the fixture credentials.
    pub async fn spawn_default() -> Result<Self, anyhow::Error> {
        Self::spawn(test_config()).await
    }

    /// Spawn a new test server instance
    ///
    /// The server binds to a random available port (127.0.0.1:0) regardless
    /// of `config.bind_address`, and runs in the background until dropped.
    pub async fn spawn(config: Config) -> Result<Self, anyhow::Error> {
        let state = Arc::new(AppState {
            config: config.clone(),
        });

        // Initialize metrics recorder for test server
        // Note: This may fail if already installed in the test process.
        // In that case, we create a new recorder without installing it globally.
        let metrics_handle = match routes::init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestTokenServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
