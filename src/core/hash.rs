//! State Hashing for Verification
//!
//! SHA-256 digests of controller state and recorded inputs, used to check
//! that a replayed session lands where the live one did.

use std::time::Duration;
use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Field-by-field SHA-256 hasher.
///
/// Every value is written little-endian after a domain tag, so two hashers
/// agree only if they saw the same fields in the same order.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Start a hash under `domain`.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Hasher for controller snapshots.
    pub fn for_turn_state() -> Self {
        Self::new(b"TURN_CONTROL_STATE_V1")
    }

    /// Hasher for recorded driver inputs.
    pub fn for_driver_inputs() -> Self {
        Self::new(b"TURN_CONTROL_INPUTS_V1")
    }

    /// Write a single byte.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Write a u32.
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Write a u64.
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Write a duration as whole seconds plus sub-second nanos.
    #[inline]
    pub fn update_duration(&mut self, value: Duration) {
        self.update_u64(value.as_secs());
        self.update_u32(value.subsec_nanos());
    }

    /// Write an optional tag, with 0xFF standing for `None`.
    #[inline]
    pub fn update_opt_u8(&mut self, value: Option<u8>) {
        self.update_u8(value.unwrap_or(u8::MAX));
    }

    /// Finish and return the digest.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Hash controller state at `tick`; the closure appends the remaining fields.
pub fn compute_state_hash<F>(tick: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_turn_state();
    hasher.update_u64(tick);
    add_state(&mut hasher);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_fields_same_digest() {
        let digest = || {
            compute_state_hash(12, |h| {
                h.update_duration(Duration::from_millis(200));
                h.update_opt_u8(Some(1));
            })
        };
        assert_eq!(digest(), digest());
    }

    #[test]
    fn test_field_order_changes_digest() {
        let forward = compute_state_hash(0, |h| {
            h.update_u32(1);
            h.update_u32(2);
        });
        let reversed = compute_state_hash(0, |h| {
            h.update_u32(2);
            h.update_u32(1);
        });
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_state_and_input_domains_differ() {
        let mut state = StateHasher::for_turn_state();
        let mut inputs = StateHasher::for_driver_inputs();
        state.update_u64(7);
        inputs.update_u64(7);
        assert_ne!(state.finalize(), inputs.finalize());
    }

    #[test]
    fn test_none_differs_from_zero() {
        let none = compute_state_hash(0, |h| h.update_opt_u8(None));
        let zero = compute_state_hash(0, |h| h.update_opt_u8(Some(0)));
        assert_ne!(none, zero);
    }

    #[test]
    fn test_tick_is_hashed() {
        let at_100 = compute_state_hash(100, |h| h.update_duration(Duration::from_millis(50)));
        let at_101 = compute_state_hash(101, |h| h.update_duration(Duration::from_millis(50)));
        assert_ne!(at_100, at_101);
    }

    #[test]
    fn test_duration_nanos_are_hashed() {
        let a = compute_state_hash(0, |h| h.update_duration(Duration::from_nanos(1)));
        let b = compute_state_hash(0, |h| h.update_duration(Duration::from_nanos(2)));
        assert_ne!(a, b);
    }
}
