//! Request-addressed cache key generation.

use sha2::{Digest, Sha256};

/// Compute a cache key for a provider request.
///
/// `namespace` identifies the call site (e.g. `pexels:search`); `params` is
/// the normalized request serialized as JSON.
pub fn compute_cache_key(namespace: &str, params: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b"\n");
    hasher.update(params.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
