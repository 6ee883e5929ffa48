//! Core deterministic primitives.
//!
//! Time and hashing helpers shared by the turn controller and replay.

pub mod timer;
pub mod hash;

// Re-export core types
pub use timer::Countdown;
pub use hash::{StateHash, StateHasher, compute_state_hash};
