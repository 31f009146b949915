//! Deterministic credential fixtures.
//!
//! Two environments are configured:
//! - `dev` with profiles `VP1`, `VP2`
//! - `prod` with profile `VP-prod`
//!
//! plus `no-profiles`, which has credentials but no registered profile.

use common::secret::SecretString;
use std::path::PathBuf;
use token_service::config::{Config, CredentialSet, CredentialStore};

pub const DEV_ACCOUNT_SID: &str = "AC-dev-0001";
pub const DEV_SIGNING_KEY_SID: &str = "SK-dev-0001";
pub const DEV_SIGNING_KEY_SECRET: &str = "dev-signing-secret-0001";

pub const PROD_ACCOUNT_SID: &str = "AC-prod-0001";
pub const PROD_SIGNING_KEY_SID: &str = "SK-prod-0001";
pub const PROD_SIGNING_KEY_SECRET: &str = "prod-signing-secret-0001";

pub const NO_PROFILES_ENVIRONMENT: &str = "no-profiles";

/// Credential set with deterministic sids derived from `name`.
pub fn test_credential_set(name: &str, profiles: &[&str]) -> CredentialSet {
    CredentialSet {
        account_sid: format!("AC-{name}-0001"),
        signing_key_sid: format!("SK-{name}-0001"),
        signing_key_secret: SecretString::from(format!("{name}-signing-secret-0001")),
        configuration_profile_sids: profiles.iter().map(ToString::to_string).collect(),
    }
}

pub fn test_credentials() -> CredentialStore {
    [
        ("dev".to_string(), test_credential_set("dev", &["VP1", "VP2"])),
        ("prod".to_string(), test_credential_set("prod", &["VP-prod"])),
        (
            NO_PROFILES_ENVIRONMENT.to_string(),
            test_credential_set(NO_PROFILES_ENVIRONMENT, &[]),
        ),
    ]
    .into_iter()
    .collect()
}

/// Signing secret for a fixture environment.
pub fn test_signing_secret(environment: &str) -> SecretString {
    SecretString::from(format!("{environment}-signing-secret-0001"))
}

/// Server config over the fixture credentials, bound to an ephemeral port.
pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".to_string(),
        default_environment: "prod".to_string(),
        credentials: test_credentials(),
        static_dirs: Vec::<PathBuf>::new(),
        allow_anonymous_identity: true,
    }
}
