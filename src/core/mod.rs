//! Core deterministic primitives.
//!
//! Pure math and hashing with no knowledge of players or matches.

pub mod kinematics;
pub mod hash;

// Re-export core types
pub use kinematics::{integrate_dive, integrate_jump, DiveDirection};
pub use hash::{compute_state_hash, StateHash, StateHasher};
