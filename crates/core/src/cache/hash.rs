//! Request fingerprint generation.

use sha2::{Digest, Sha256};

/// Compute the cache fingerprint of a request.
///
/// `body` is included only for requests whose body takes part in the
/// request's identity (JSON POST bodies).
pub fn compute_fingerprint(method: &str, path: &str, query: &str, body: Option<&[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(path.as_bytes());
    hasher.update(b"\n");
    hasher.update(query.as_bytes());
    if let Some(body) = body {
        hasher.update(b"\n");
        hasher.update(body);
    }
    hex::encode(hasher.finalize())
}
