//! Stable hashing for actor identifiers.
//!
//! Cache keys and experiment buckets must agree across processes and
//! restarts, so both go through blake3 rather than the std hasher.

/// Hex-encoded, truncated blake3 digest of an actor id. This is the only
/// form of actor identity that may appear in cache keys or logs.
pub fn actor_hash(actor_id: &str) -> String {
    let digest = blake3::hash(actor_id.as_bytes());
    digest.to_hex()[..16].to_string()
}

/// Stable bucket for experiment assignment: the first 8 bytes of
/// blake3(salt || actor_id) as a little-endian integer.
pub fn stable_bucket(salt: &str, actor_id: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"\x00");
    hasher.update(actor_id.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_hash_is_stable_and_opaque() {
        let h1 = actor_hash("user@example.com");
        let h2 = actor_hash("user@example.com");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 16);
        assert!(!h1.contains('@'));
    }

    #[test]
    fn bucket_depends_on_salt() {
        let a = stable_bucket("window-1", "actor-7");
        let b = stable_bucket("window-2", "actor-7");
        assert_eq!(a, stable_bucket("window-1", "actor-7"));
        assert_ne!(a, b);
    }
}
