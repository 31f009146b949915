//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for access tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use common::jwt::{decode_claims_unverified, AccessTokenClaims, ACCESS_TOKEN_CONTENT_TYPE};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

fn claims_of(token: &str) -> AccessTokenClaims {
    decode_claims_unverified(token).expect("Failed to decode access token claims")
}

/// Custom assertions for issued access tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_identity("alice")
///     .assert_configuration_profile("VP1")
///     .assert_verifies_with("dev-signing-secret-0001");
/// ```
pub trait TokenAssertions {
    /// Assert header and claim structure (HS256, JWT, access token content type)
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert the token carries the specified identity
    fn assert_identity(&self, identity: &str) -> &Self;

    /// Assert the token carries no identity
    fn assert_anonymous(&self) -> &Self;

    /// Assert the grant references the specified configuration profile
    fn assert_configuration_profile(&self, profile_sid: &str) -> &Self;

    /// Assert `exp - iat` equals the specified seconds
    fn assert_lifetime(&self, seconds: i64) -> &Self;

    /// Assert the signature verifies with the specified signing secret
    fn assert_verifies_with(&self, signing_key_secret: &str) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header_bytes = URL_SAFE_NO_PAD
            .decode(parts[0])
            .expect("Failed to base64 decode JWT header");
        let header: Value =
            serde_json::from_slice(&header_bytes).expect("Failed to parse JWT header JSON");

        assert_eq!(header["alg"], "HS256", "Expected HS256 algorithm");
        assert_eq!(header["typ"], "JWT", "Expected JWT type");
        assert_eq!(
            header["cty"], ACCESS_TOKEN_CONTENT_TYPE,
            "Expected access token content type"
        );

        claims_of(self);

        self
    }

    fn assert_identity(&self, identity: &str) -> &Self {
        let claims = claims_of(self);
        assert_eq!(
            claims.identity(),
            Some(identity),
            "Expected identity '{}', got {:?}",
            identity,
            claims.identity()
        );
        self
    }

    fn assert_anonymous(&self) -> &Self {
        let claims = claims_of(self);
        assert!(
            claims.identity().is_none(),
            "Expected no identity, got {:?}",
            claims.identity()
        );
        self
    }

    fn assert_configuration_profile(&self, profile_sid: &str) -> &Self {
        let claims = claims_of(self);
        assert_eq!(
            claims.configuration_profile_sid(),
            Some(profile_sid),
            "Expected configuration profile '{}', got {:?}",
            profile_sid,
            claims.configuration_profile_sid()
        );
        self
    }

    fn assert_lifetime(&self, seconds: i64) -> &Self {
        let claims = claims_of(self);
        assert_eq!(
            claims.lifetime_seconds(),
            seconds,
            "Expected lifetime of {} seconds, got {}",
            seconds,
            claims.lifetime_seconds()
        );
        self
    }

    fn assert_verifies_with(&self, signing_key_secret: &str) -> &Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let result = decode::<AccessTokenClaims>(
            self,
            &DecodingKey::from_secret(signing_key_secret.as_bytes()),
            &validation,
        );
        assert!(
            result.is_ok(),
            "Token does not verify with the given secret: {:?}",
            result.err()
        );
        self
    }
}
