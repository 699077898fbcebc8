//! Recording and Replay
//!
//! A match is fully determined by its config and, per tick, the scaled `dt`
//! plus each player's button level and contact report. Recording those is
//! enough to re-run the match and land on the same state hash.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::game::config::{ConfigError, MatchConfig};
use crate::game::events::GameEvent;
use crate::game::input::TickInput;
use crate::game::state::MatchState;
use crate::game::tick::tick;

/// Replay failures.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Recording bytes could not be encoded or decoded
    #[error("recording codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Recorded config does not validate
    #[error("recording has invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// One recorded tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    /// Scaled seconds passed to the tick
    pub dt: f64,
    /// Buttons and contacts seen by the tick
    pub input: TickInput,
}

/// Everything needed to reproduce a match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecording {
    /// Config the match ran with
    pub config: MatchConfig,
    /// Ticks in order
    pub ticks: Vec<TickRecord>,
}

impl MatchRecording {
    /// Start an empty recording.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            ticks: Vec::new(),
        }
    }

    /// Append a tick.
    pub fn push(&mut self, dt: f64, input: TickInput) {
        self.ticks.push(TickRecord { dt, input });
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// True if no ticks were recorded.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Serialize to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(data)?)
    }
}

/// Replay a recording on a fresh match.
///
/// Returns the final state and every event produced along the way.
pub fn replay(recording: &MatchRecording) -> Result<(MatchState, Vec<GameEvent>), ReplayError> {
    recording.config.validate()?;

    let config = &recording.config;
    let mut state = MatchState::new(config);
    let mut all_events = Vec::new();

    for record in &recording.ticks {
        let result = tick(&mut state, record.dt, &record.input, config);
        all_events.extend(result.events);
    }

    debug!(
        "Replayed {} ticks to round {}",
        recording.len(),
        state.round
    );

    Ok((state, all_events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::contact::ContactReport;
    use crate::game::state::{PerPlayer, PlayerId};

    const DT: f64 = 1.0 / 30.0;

    /// P1 jumps, dives, and lands a body hit; then some idle ticks.
    fn sample_recording() -> MatchRecording {
        let mut recording = MatchRecording::new(MatchConfig::default());
        for pressed in [true, true, false, true, false] {
            recording.push(DT, TickInput::idle().with_action(PlayerId::First, pressed));
        }
        let body = ContactReport { body: true, ..ContactReport::NONE };
        recording.push(DT, TickInput::idle().with_contact(PlayerId::First, body));
        for _ in 0..10 {
            recording.push(0.02, TickInput::idle().with_action(PlayerId::Second, true));
        }
        recording
    }

    fn run_live(recording: &MatchRecording) -> MatchState {
        let mut state = MatchState::new(&recording.config);
        for record in &recording.ticks {
            tick(&mut state, record.dt, &record.input, &recording.config);
        }
        state
    }

    #[test]
    fn test_replay_matches_live_run() {
        let recording = sample_recording();
        let live = run_live(&recording);

        let (replayed, events) = replay(&recording).unwrap();
        assert_eq!(replayed.compute_hash(), live.compute_hash());
        assert_eq!(replayed.scores(), live.scores());
        assert_eq!(replayed.round, 2);
        assert!(!events.is_empty());
    }

    #[test]
    fn test_bytes_survive_and_replay_identically() {
        let recording = sample_recording();
        let bytes = recording.to_bytes().unwrap();
        let decoded = MatchRecording::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, recording);

        let (a, _) = replay(&recording).unwrap();
        let (b, _) = replay(&decoded).unwrap();
        assert_eq!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_different_inputs_diverge() {
        let recording = sample_recording();
        // Without the body contact the dive misses and the round never ends.
        let mut altered = recording.clone();
        altered.ticks[5].input = TickInput::idle();

        let (a, _) = replay(&recording).unwrap();
        let (b, _) = replay(&altered).unwrap();
        assert_eq!(b.round, 1);
        assert_eq!(b.scores(), PerPlayer::new(0, 0));
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut recording = sample_recording();
        recording.config.physics.gravity = 10.0;
        assert!(matches!(
            replay(&recording),
            Err(ReplayError::InvalidConfig(ConfigError::NonNegativeGravity(_)))
        ));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(matches!(
            MatchRecording::from_bytes(&[0xFF, 0x01]),
            Err(ReplayError::Codec(_))
        ));
    }
}
