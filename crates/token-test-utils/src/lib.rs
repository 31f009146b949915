//! # Token Test Utilities
//!
//! Shared test utilities for the token service.
//!
//! This crate provides:
//! - Deterministic credential fixtures (fixed sids and signing secrets)
//! - Server test harness (`TestTokenServer` for E2E tests)
//! - Custom assertions (`TokenAssertions` trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestTokenServer::spawn_default().await?;
//!     let token = reqwest::get(format!("{}/token?identity=alice&env=dev", server.url()))
//!         .await?
//!         .text()
//!         .await?;
//!
//!     token
//!         .assert_valid_jwt()
//!         .assert_configuration_profile("VP1")
//!         .assert_verifies_with(DEV_SIGNING_KEY_SECRET);
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod credential_fixtures;
pub mod server_harness;

// Re-export commonly used items
pub use assertions::*;
pub use credential_fixtures::*;
pub use server_harness::*;
