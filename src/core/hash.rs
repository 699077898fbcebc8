//! State Hashing
//!
//! SHA-256 digests of simulation state, used to check that a replayed
//! recording lands on exactly the same state as the live run.
//!
//! Floats are hashed by their IEEE-754 bit pattern, so `0.0` and `-0.0`
//! hash differently. The simulation never produces `-0.0` through clamping,
//! but callers comparing hand-built states should keep that in mind.

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Domain separator for match state digests.
const MATCH_STATE_DOMAIN: &[u8] = b"FOOTSMASH_STATE_V1";

/// Incremental hasher for simulation state.
///
/// Order of updates is part of the digest.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for match state.
    pub fn for_match_state() -> Self {
        Self::new(MATCH_STATE_DOMAIN)
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f64 (bit pattern, little-endian).
    #[inline]
    pub fn update_f64(&mut self, value: f64) {
        self.update_u64(value.to_bits());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute a match state hash.
///
/// The tick count and round number always lead; `add_state` appends the
/// per-player data.
pub fn compute_state_hash<F>(tick: u64, round: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_match_state();
    hasher.update_u64(tick);
    hasher.update_u32(round);
    add_state(&mut hasher);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_repeatable() {
        let make = || {
            compute_state_hash(42, 3, |h| {
                h.update_f64(27.5);
                h.update_bool(true);
            })
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn test_hash_order_matters() {
        let a = compute_state_hash(0, 0, |h| {
            h.update_f64(1.0);
            h.update_f64(2.0);
        });
        let b = compute_state_hash(0, 0, |h| {
            h.update_f64(2.0);
            h.update_f64(1.0);
        });
        assert_ne!(a, b);
    }

    #[test]
    fn test_tiny_float_difference_changes_hash() {
        let a = compute_state_hash(0, 0, |h| h.update_f64(0.1 + 0.2));
        let b = compute_state_hash(0, 0, |h| h.update_f64(0.3));
        assert_ne!(a, b);
    }

    #[test]
    fn test_domain_separation() {
        let mut a = StateHasher::new(b"A");
        let mut b = StateHasher::new(b"B");
        a.update_u32(7);
        b.update_u32(7);
        assert_ne!(a.finalize(), b.finalize());
    }
}
