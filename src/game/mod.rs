//! Game Logic Module
//!
//! All match simulation code. Deterministic given the same `dt` sequence
//! and inputs; the clock and host collaborators sit at the edges.
//!
//! ## Module Structure
//!
//! - `config`: Arena, physics and hitbox tuning
//! - `state`: Match state, player state, activities
//! - `activity`: Stand / Jump / Dive state machine
//! - `contact`: Contact reports and the reference hitbox detector
//! - `outcome`: Judgements, round outcomes and scoring
//! - `input`: Button polling and per-tick input
//! - `events`: Game events and the presenter interface
//! - `tick`: Authoritative simulation step
//! - `clock`: Frame timing
//! - `runner`: Frame pump wiring the above together
//! - `replay`: Match recordings and deterministic replay

pub mod config;
pub mod state;
pub mod activity;
pub mod contact;
pub mod outcome;
pub mod input;
pub mod events;
pub mod tick;
pub mod clock;
pub mod runner;
pub mod replay;

// Re-export key types
pub use config::{ConfigError, MatchConfig};
pub use state::{Activity, ActivityKind, Facing, MatchState, PerPlayer, Player, PlayerId};
pub use contact::{ContactReport, ContactSource, HitboxDetector};
pub use outcome::{Judgement, RoundOutcome};
pub use input::{InputSource, ScriptedInput, TickInput};
pub use events::{GameEvent, GameEventData, Presenter};
pub use tick::TickResult;
pub use clock::{Clock, ManualClock, SystemClock};
pub use runner::MatchRunner;
pub use replay::{replay, MatchRecording, ReplayError};
