//! Game Events
//!
//! Everything a presenter (renderer, HUD, log) needs to react to, produced
//! by the simulation in the order it happened within a tick.

use serde::{Deserialize, Serialize};

use crate::game::outcome::RoundOutcome;
use crate::game::state::{ActivityKind, Facing, PerPlayer, PlayerId};

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A player moved
    PositionChanged {
        /// Player that moved
        player: PlayerId,
        /// New x
        x: f64,
        /// New height above ground
        height: f64,
        /// Facing against the opponent
        facing: Facing,
    },

    /// A player changed activity
    ActivityChanged {
        /// Player whose activity changed
        player: PlayerId,
        /// Previous activity
        from: ActivityKind,
        /// New activity
        to: ActivityKind,
    },

    /// A round was decided and scores updated
    RoundEnded {
        /// How the round was won
        outcome: RoundOutcome,
        /// Round that just ended
        round: u32,
        /// Scores after awarding points
        scores: PerPlayer<u32>,
    },
}

/// A game event stamped with its tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create position changed event.
    pub fn position_changed(tick: u64, player: PlayerId, x: f64, height: f64, facing: Facing) -> Self {
        Self {
            tick,
            data: GameEventData::PositionChanged { player, x, height, facing },
        }
    }

    /// Create activity changed event.
    pub fn activity_changed(tick: u64, player: PlayerId, from: ActivityKind, to: ActivityKind) -> Self {
        Self {
            tick,
            data: GameEventData::ActivityChanged { player, from, to },
        }
    }

    /// Create round ended event.
    pub fn round_ended(tick: u64, outcome: RoundOutcome, round: u32, scores: PerPlayer<u32>) -> Self {
        Self {
            tick,
            data: GameEventData::RoundEnded { outcome, round, scores },
        }
    }
}

/// Receives simulation output for display.
pub trait Presenter {
    /// A player's position changed.
    fn on_position_changed(&mut self, player: PlayerId, x: f64, height: f64, facing: Facing);

    /// A player's activity changed (sprite swaps and the like).
    fn on_activity_changed(&mut self, _player: PlayerId, _from: ActivityKind, _to: ActivityKind) {}

    /// A round ended. Called once per resolved round.
    fn on_round_end(&mut self, outcome: RoundOutcome, scores: PerPlayer<u32>);
}

/// Forward events to a presenter in order.
pub fn dispatch<P: Presenter + ?Sized>(events: &[GameEvent], presenter: &mut P) {
    for event in events {
        match event.data {
            GameEventData::PositionChanged { player, x, height, facing } => {
                presenter.on_position_changed(player, x, height, facing);
            }
            GameEventData::ActivityChanged { player, from, to } => {
                presenter.on_activity_changed(player, from, to);
            }
            GameEventData::RoundEnded { outcome, scores, .. } => {
                presenter.on_round_end(outcome, scores);
            }
        }
    }
}

/// Presenter that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn on_position_changed(&mut self, _player: PlayerId, _x: f64, _height: f64, _facing: Facing) {}

    fn on_round_end(&mut self, _outcome: RoundOutcome, _scores: PerPlayer<u32>) {}
}
