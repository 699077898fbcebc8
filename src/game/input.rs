//! Input
//!
//! Footsmash has one button per player. The host is polled once per tick
//! for each button's level; edge detection happens inside the player.

use serde::{Deserialize, Serialize};

use crate::game::contact::ContactReport;
use crate::game::state::{PerPlayer, PlayerId};

/// Supplies the action button level for each player.
pub trait InputSource {
    /// Is `player`'s action button held right now?
    fn is_action_pressed(&mut self, player: PlayerId) -> bool;
}

impl<F> InputSource for F
where
    F: FnMut(PlayerId) -> bool,
{
    fn is_action_pressed(&mut self, player: PlayerId) -> bool {
        self(player)
    }
}

/// Everything the simulation consumes for one tick, besides `dt`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Action button level per player
    pub action: PerPlayer<bool>,
    /// Foot contacts per player (only read while that player dives)
    pub contact: PerPlayer<ContactReport>,
}

impl TickInput {
    /// No buttons, no contacts.
    pub const fn idle() -> Self {
        Self {
            action: PerPlayer::new(false, false),
            contact: PerPlayer::new(ContactReport::NONE, ContactReport::NONE),
        }
    }

    /// Set a player's button level.
    pub fn with_action(mut self, player: PlayerId, pressed: bool) -> Self {
        self.action[player] = pressed;
        self
    }

    /// Set a player's contact report.
    pub fn with_contact(mut self, player: PlayerId, contact: ContactReport) -> Self {
        self.contact[player] = contact;
        self
    }
}

/// Replays a fixed button schedule, one entry per poll round.
///
/// Once the schedule runs out every button reads as released.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: Vec<PerPlayer<bool>>,
    cursor: PerPlayer<usize>,
}

impl ScriptedInput {
    /// Create from per-tick button levels.
    pub fn new(frames: Vec<PerPlayer<bool>>) -> Self {
        Self {
            frames,
            cursor: PerPlayer::default(),
        }
    }

    /// Build a schedule of `len` ticks where `player` holds the button
    /// during each `(start, end)` range (end exclusive).
    pub fn holds(len: usize, player_holds: PerPlayer<&[(usize, usize)]>) -> Self {
        let frames = (0..len)
            .map(|t| {
                PerPlayer::from_fn(|id| {
                    player_holds[id].iter().any(|&(start, end)| t >= start && t < end)
                })
            })
            .collect();
        Self::new(frames)
    }

    /// Number of scheduled ticks.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn is_action_pressed(&mut self, player: PlayerId) -> bool {
        let index = self.cursor[player];
        self.cursor[player] += 1;
        self.frames.get(index).is_some_and(|frame| frame[player])
    }
}
