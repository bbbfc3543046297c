//! Digest computation for publish snapshots.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of the exact snapshot bytes (64 characters)
///
/// ```
/// use menuver_core::snapshot::compute_snapshot_digest;
///
/// let digest = compute_snapshot_digest(r#"{"button":[]}"#);
/// assert_eq!(digest.len(), 64);
/// ```
pub fn compute_snapshot_digest(snapshot: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(snapshot.as_bytes());
    hex::encode(hasher.finalize())
}
