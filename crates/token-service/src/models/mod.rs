use std::collections::HashMap;

/// Query keys accepted for the identity, in priority order.
pub const IDENTITY_KEYS: [&str; 3] = ["identity", "address", "name"];

/// Query keys accepted for the environment, in priority order.
pub const ENVIRONMENT_KEYS: [&str; 3] = ["env", "environment", "realm"];

/// A token request after alias resolution.
///
/// Built from the raw query string of `GET /token`. Empty values count as
/// absent, so `?identity=&name=bob` resolves to `bob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub identity: Option<String>,
    pub environment: String,
    /// Raw TTL text; parsed by the issuing service.
    pub ttl: Option<String>,
    pub configuration_profile_sid: Option<String>,
}

impl TokenRequest {
    pub fn from_query(query: &HashMap<String, String>, default_environment: &str) -> Self {
        let identity = first_present(query, &IDENTITY_KEYS);
        let environment = first_present(query, &ENVIRONMENT_KEYS)
            .unwrap_or_else(|| default_environment.to_string());
        let ttl = first_present(query, &["ttl"]);
        let configuration_profile_sid = first_present(query, &["configurationProfileSid"]);

        Self {
            identity,
            environment,
            ttl,
            configuration_profile_sid,
        }
    }
}

fn first_present(query: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| query.get(*key))
        .find(|value| !value.is_empty())
        .cloned()
}
