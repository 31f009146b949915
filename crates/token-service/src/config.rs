use common::secret::SecretString;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Environment used when a token request names none.
pub const DEFAULT_ENVIRONMENT: &str = "prod";

/// Credentials for one environment.
///
/// `Debug` is safe to log: the signing-key secret is a `SecretString`.
/// Field names are also accepted in camelCase.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialSet {
    #[serde(alias = "accountSid")]
    pub account_sid: String,

    #[serde(alias = "signingKeySid", alias = "apiKeySid")]
    pub signing_key_sid: String,

    #[serde(alias = "signingKeySecret", alias = "apiKeySecret")]
    pub signing_key_secret: SecretString,

    /// Profile ids in declaration order; the first one is the default.
    ///
    /// Either a list of ids or an object keyed by id (values ignored).
    #[serde(
        default,
        alias = "configurationProfileSids",
        deserialize_with = "deserialize_profile_sids"
    )]
    pub configuration_profile_sids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileSids {
    List(Vec<String>),
    Keyed(IndexMap<String, serde_json::Value>),
}

fn deserialize_profile_sids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ProfileSids::deserialize(deserializer)? {
        ProfileSids::List(sids) => sids,
        ProfileSids::Keyed(sids) => sids.into_keys().collect(),
    })
}

impl CredentialSet {
    /// The profile used when a request does not name one.
    pub fn default_configuration_profile(&self) -> Option<&str> {
        self.configuration_profile_sids.first().map(String::as_str)
    }
}

/// Credential sets keyed by environment name. Immutable after startup.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    environments: HashMap<String, CredentialSet>,
}

impl CredentialStore {
    /// Parse the credentials JSON document (`{"<env>": {...}, ...}`).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let environments: HashMap<String, CredentialSet> = serde_json::from_str(json)?;
        Ok(Self { environments })
    }

    pub fn get(&self, environment: &str) -> Option<&CredentialSet> {
        self.environments.get(environment)
    }

    pub fn contains(&self, environment: &str) -> bool {
        self.environments.contains_key(environment)
    }

    /// Sorted environment names, for startup logging.
    pub fn environment_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.environments.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<(String, CredentialSet)> for CredentialStore {
    fn from_iter<I: IntoIterator<Item = (String, CredentialSet)>>(iter: I) -> Self {
        Self {
            environments: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub default_environment: String,
    pub credentials: CredentialStore,
    /// Static asset directories, searched in order for unmatched GET paths.
    pub static_dirs: Vec<PathBuf>,
    /// Issue tokens for requests that carry no identity.
    pub allow_anonymous_identity: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Failed to read credentials file {path}: {source}")]
    CredentialsFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid credentials JSON: {0}")]
    InvalidCredentials(#[from] serde_json::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let default_environment = vars
            .get("DEFAULT_ENVIRONMENT")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let credentials_json = match (vars.get("CREDENTIALS_FILE"), vars.get("CREDENTIALS_JSON")) {
            (Some(path), _) => {
                std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialsFile {
                    path: path.clone(),
                    source,
                })?
            }
            (None, Some(json)) => json.clone(),
            (None, None) => {
                return Err(ConfigError::MissingEnvVar(
                    "CREDENTIALS_FILE or CREDENTIALS_JSON".to_string(),
                ))
            }
        };
        let credentials = CredentialStore::from_json(&credentials_json)?;

        let static_dirs = vars
            .get("STATIC_DIRS")
            .map(|dirs| {
                dirs.split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        let allow_anonymous_identity = match vars.get("ALLOW_ANONYMOUS_IDENTITY") {
            None => true,
            Some(value) => parse_bool(value).ok_or_else(|| ConfigError::InvalidValue {
                name: "ALLOW_ANONYMOUS_IDENTITY".to_string(),
                value: value.clone(),
            })?,
        };

        Ok(Config {
            bind_address,
            default_environment,
            credentials,
            static_dirs,
            allow_anonymous_identity,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
