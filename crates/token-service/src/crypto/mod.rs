use crate::errors::TokenError;
use common::jwt::{AccessTokenClaims, ACCESS_TOKEN_CONTENT_TYPE, MAX_JWT_SIZE_BYTES};
use common::secret::{ExposeSecret, SecretString};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::instrument;

/// Lifetime applied when a request carries no usable TTL (1 hour).
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;

/// Sign access token claims with an environment's signing-key secret (HS256).
#[instrument(skip_all)]
pub fn sign_access_token(
    claims: &AccessTokenClaims,
    signing_key_secret: &SecretString,
) -> Result<String, TokenError> {
    let encoding_key = EncodingKey::from_secret(signing_key_secret.expose_secret().as_bytes());

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());
    header.cty = Some(ACCESS_TOKEN_CONTENT_TYPE.to_string());

    encode(&header, claims, &encoding_key)
        .map_err(|e| TokenError::Signing(format!("JWT signing operation failed: {}", e)))
}

/// Verify an access token against a signing-key secret.
///
/// The real-time platform performs this check in production; the issuer only
/// needs it for self-tests and test harnesses. Validates size, signature and
/// `exp`.
#[instrument(skip_all)]
pub fn verify_access_token(
    token: &str,
    signing_key_secret: &SecretString,
) -> Result<AccessTokenClaims, TokenError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        return Err(TokenError::Signing(
            "Token exceeds maximum allowed size".to_string(),
        ));
    }

    let decoding_key = DecodingKey::from_secret(signing_key_secret.expose_secret().as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<AccessTokenClaims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(target: "token.crypto", error = %e, "Token verification failed");
            TokenError::Signing("The access token is invalid or expired".to_string())
        })
}
