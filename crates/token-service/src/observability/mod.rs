//! Observability for the token service.
//!
//! Instrumentation uses `#[instrument(skip_all)]` with explicit field
//! allow-listing. Identities are only ever logged as a correlation hash;
//! signing secrets and tokens are never logged.

pub mod metrics;

pub use metrics::record_token_issuance;

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars).
///
/// One-way and truncated; not suitable for anything but log correlation.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.get(..4).unwrap_or_default())
}
