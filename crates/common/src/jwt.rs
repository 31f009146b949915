//! Access token claims shared between the token issuer and the session client.
//!
//! The issuer signs these claims; the real-time platform verifies them. The
//! session client never holds a signing secret, so it can only inspect a token
//! without verifying it (to sanity-check what it was handed and to log the
//! expiry).
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing
//! - Generic error messages prevent information leakage
//! - The identity inside the grants is redacted in Debug output
//!
//! # Usage
//!
//! ```rust,ignore
//! use common::jwt::decode_claims_unverified;
//!
//! let claims = decode_claims_unverified(&token)?;
//! tracing::debug!(expires_at = claims.exp, "Received access token");
//! ```

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum accepted token size in bytes (8KB).
///
/// Typical access tokens are 300-500 bytes. Anything larger is rejected before
/// base64 decoding.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Content type header value the real-time platform expects on access tokens.
pub const ACCESS_TOKEN_CONTENT_TYPE: &str = "twilio-fpa;v=1";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while inspecting an access token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The access token is invalid")]
    TokenTooLarge,

    /// Token format is invalid (not a valid JWT structure or payload).
    #[error("The access token is invalid")]
    MalformedToken,
}

// =============================================================================
// Claims Types
// =============================================================================

/// Join-session grant, bound to one configuration profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoGrant {
    /// Configuration profile the session is joined with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_profile_sid: Option<String>,
}

/// Grants section of an access token.
///
/// Exactly one capability grant (`video`) is carried.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grants {
    /// Identity the token authenticates as. Absent for anonymous tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,

    /// Join-session grant.
    pub video: VideoGrant,
}

impl fmt::Debug for Grants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grants")
            .field("identity", &self.identity.as_ref().map(|_| "[REDACTED]"))
            .field("video", &self.video)
            .finish()
    }
}

/// Access token claims.
///
/// # Fields
///
/// - `jti`: unique token id (`{signing_key_sid}-{iat}`)
/// - `iss`: signing key identifier
/// - `sub`: account identifier
/// - `iat` / `exp`: issued-at and expiry (Unix epoch seconds)
/// - `grants`: identity plus the join-session grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub jti: String,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub grants: Grants,
}

impl AccessTokenClaims {
    /// Identity carried by the token, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.grants.identity.as_deref()
    }

    /// Configuration profile referenced by the join-session grant.
    #[must_use]
    pub fn configuration_profile_sid(&self) -> Option<&str> {
        self.grants.video.configuration_profile_sid.as_deref()
    }

    /// Lifetime the token was issued with, in seconds.
    #[must_use]
    pub fn lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Decode the claims of an access token WITHOUT verifying its signature.
///
/// # Security
///
/// - Token size is checked BEFORE any parsing
/// - The signature is NOT checked; only the platform holding the signing
///   secret can do that
///
/// # Errors
///
/// - `TokenTooLarge` - Token exceeds `MAX_JWT_SIZE_BYTES`
/// - `MalformedToken` - Wrong structure, bad base64, or unexpected payload JSON
pub fn decode_claims_unverified(token: &str) -> Result<AccessTokenClaims, JwtValidationError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    let [_, payload_part, _] = parts.as_slice() else {
        tracing::debug!(
            target: "common.jwt",
            parts = parts.len(),
            "Token rejected: invalid JWT format"
        );
        return Err(JwtValidationError::MalformedToken);
    };

    let payload_bytes = URL_SAFE_NO_PAD.decode(payload_part).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to decode JWT payload base64");
        JwtValidationError::MalformedToken
    })?;

    serde_json::from_slice(&payload_bytes).map_err(|e| {
        tracing::debug!(target: "common.jwt", error = %e, "Failed to parse JWT payload JSON");
        JwtValidationError::MalformedToken
    })
}

// =============================================================================
// Tests
// =============================================================================
