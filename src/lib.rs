//! # Footsmash
//!
//! Deterministic core of Footsmash, a two-player, one-button dive-kick duel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         FOOTSMASH                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── kinematics.rs - Jump and dive integration               │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Match simulation                          │
//! │  ├── config.rs   - Arena and physics tuning                  │
//! │  ├── state.rs    - Match and player state                    │
//! │  ├── activity.rs - Stand / Jump / Dive state machine         │
//! │  ├── contact.rs  - Contact reports, hitbox detector          │
//! │  ├── outcome.rs  - Judgements and scoring                    │
//! │  ├── input.rs    - Button polling                            │
//! │  ├── events.rs   - Events and presenter interface            │
//! │  ├── tick.rs     - Authoritative simulation step             │
//! │  ├── clock.rs    - Frame timing                              │
//! │  ├── runner.rs   - Frame pump                                │
//! │  └── replay.rs   - Recordings and replay                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Given the same config and the same sequence of `dt`, button levels and
//! contact reports, [`game::tick::tick`] produces the same state bit for
//! bit. Wall-clock time, input devices, geometry and rendering are all
//! behind traits so a recorded match can be replayed and its state hash
//! compared.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use core::kinematics::DiveDirection;
pub use core::hash::StateHash;
pub use game::config::MatchConfig;
pub use game::state::{MatchState, Player, PlayerId};
pub use game::outcome::{Judgement, RoundOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
