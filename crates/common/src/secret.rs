//! Secret types for protecting signing material from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Signing-key
//! secrets loaded from the credentials file are held as [`SecretString`], so
//! any struct deriving `Debug` around them prints a redacted placeholder and
//! the raw value is only reachable through an explicit `expose_secret()` call.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct SigningKey {
//!     sid: String,
//!     secret: SecretString,
//! }
//!
//! let key = SigningKey {
//!     sid: "SK123".to_string(),
//!     secret: SecretString::from("shh"),
//! };
//!
//! assert!(!format!("{key:?}").contains("shh"));
//! assert_eq!(key.secret.expose_secret(), "shh");
//! ```
//!
//! With the `serde` feature of `secrecy` enabled, secrets deserialize straight
//! out of the credentials JSON.

pub use secrecy::{ExposeSecret, SecretString};
