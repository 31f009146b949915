use crate::config::{Config, CredentialStore};
use crate::crypto::{self, DEFAULT_TOKEN_TTL_SECONDS};
use crate::errors::{ConfigurationError, TokenError};
use crate::models::TokenRequest;
use crate::observability::hash_for_correlation;
use chrono::Utc;
use common::jwt::{AccessTokenClaims, Grants, VideoGrant};

/// Parse a TTL the way the query string carries it.
///
/// Only a plain run of ASCII digits is accepted: no sign, no whitespace, no
/// fraction. Values that overflow `u64` are rejected too.
pub fn parse_ttl(ttl: Option<&str>) -> Option<u64> {
    let ttl = ttl?;
    if ttl.is_empty() || !ttl.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    ttl.parse().ok()
}

/// Issue an access token for `identity` in `environment`.
///
/// Falls back to the environment's first configuration profile when none is
/// given, and to `DEFAULT_TOKEN_TTL_SECONDS` when `ttl` is absent.
pub fn issue_token(
    credentials: &CredentialStore,
    identity: Option<&str>,
    environment: &str,
    ttl: Option<u64>,
    configuration_profile_sid: Option<&str>,
) -> Result<String, TokenError> {
    issue_token_at(
        credentials,
        identity,
        environment,
        ttl,
        configuration_profile_sid,
        Utc::now().timestamp(),
    )
}

/// Issue an access token as of `now` (Unix seconds).
///
/// Split out of [`issue_token`] so lifetimes can be tested against a fixed
/// clock.
pub fn issue_token_at(
    credentials: &CredentialStore,
    identity: Option<&str>,
    environment: &str,
    ttl: Option<u64>,
    configuration_profile_sid: Option<&str>,
    now: i64,
) -> Result<String, TokenError> {
    let credential_set = credentials
        .get(environment)
        .ok_or_else(|| ConfigurationError::UnknownEnvironment(environment.to_string()))?;

    let profile = match configuration_profile_sid {
        Some(profile) => profile,
        None => credential_set
            .default_configuration_profile()
            .ok_or_else(|| ConfigurationError::NoConfigurationProfile(environment.to_string()))?,
    };

    let ttl = ttl.unwrap_or(DEFAULT_TOKEN_TTL_SECONDS);
    let exp = now.saturating_add(i64::try_from(ttl).unwrap_or(i64::MAX));

    let claims = AccessTokenClaims {
        jti: format!("{}-{}", credential_set.signing_key_sid, now),
        iss: credential_set.signing_key_sid.clone(),
        sub: credential_set.account_sid.clone(),
        iat: now,
        exp,
        grants: Grants {
            identity: identity.map(ToString::to_string),
            video: VideoGrant {
                configuration_profile_sid: Some(profile.to_string()),
            },
        },
    };

    crypto::sign_access_token(&claims, &credential_set.signing_key_secret)
}

/// Issue a token for a parsed `GET /token` request, applying the server's
/// anonymous-identity policy.
pub fn issue_for_request(config: &Config, request: &TokenRequest) -> Result<String, TokenError> {
    match request.identity.as_deref() {
        Some(identity) => {
            tracing::debug!(
                target: "token.service",
                environment = %request.environment,
                identity_hash = %hash_for_correlation(identity),
                "Issuing access token"
            );
        }
        None if config.allow_anonymous_identity => {
            tracing::warn!(
                target: "token.service",
                environment = %request.environment,
                "Issuing access token without an identity"
            );
        }
        None => return Err(TokenError::MissingIdentity),
    }

    let ttl = parse_ttl(request.ttl.as_deref());
    if ttl.is_none() && request.ttl.is_some() {
        tracing::debug!(
            target: "token.service",
            "Ignoring non-numeric ttl, using default lifetime"
        );
    }

    issue_token(
        &config.credentials,
        request.identity.as_deref(),
        &request.environment,
        ttl,
        request.configuration_profile_sid.as_deref(),
    )
}
