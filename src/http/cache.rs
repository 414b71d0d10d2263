//! HTTP cache control module
//!
//! `ETag` generation and `If-None-Match` handling for static
//! responses.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from content length and a fast hash,
/// e.g. `"1a4-9f86d081"`.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let digest = hasher.finish();
    format!("\"{:x}-{digest:x}\"", content.len())
}

/// Check whether the client's `If-None-Match` header matches.
///
/// Handles a single `ETag`, a comma-separated list, and the `*`
/// wildcard. A match means the cached copy is current (304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etags| {
        client_etags
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}
