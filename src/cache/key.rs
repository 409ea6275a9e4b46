//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Tag identifying a directory scope in cache rows.
///
/// The instance-wide scope gets its own tag so invalidating it never touches
/// an organization's entries, and vice versa.
pub fn scope_tag(org_id: Option<i64>) -> String {
    match org_id {
        Some(id) => format!("org:{}", id),
        None => "instance".to_string(),
    }
}

/// Short digest naming the backend a cache entry came from.
///
/// Two hosts, or two API keys against one host, never share entries even
/// when their org ids collide. The key itself is only stored hashed.
pub fn backend_tag(base_url: &str, api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(base_url.trim_end_matches('/').as_bytes());
    hasher.update(b"|");
    hasher.update(api_key.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

/// Scope tag as stored in cache rows: the backend digest plus the scope
pub fn stored_scope(backend: &str, org_id: Option<i64>) -> String {
    format!("{}/{}", backend, scope_tag(org_id))
}

/// Generate a deterministic cache key from endpoint, backend, scope and
/// parameters.
///
/// Parameters are sorted so their order never changes the key.
pub fn cache_key(
    endpoint: &str,
    backend: &str,
    org_id: Option<i64>,
    params: &[(&str, &str)],
) -> String {
    let mut hasher = Sha256::new();

    hasher.update(endpoint.as_bytes());
    hasher.update(b"|");
    hasher.update(stored_scope(backend, org_id).as_bytes());
    hasher.update(b"|");

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort_by_key(|(k, _)| *k);

    for (k, v) in sorted_params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    format!("{:x}", hasher.finalize())
}
