//! Game State Definitions
//!
//! Players, their activity, and the match they belong to.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
use crate::core::kinematics::DiveDirection;
use crate::game::config::{ArenaConfig, MatchConfig};
use crate::game::events::GameEvent;

// =============================================================================
// PLAYER ID
// =============================================================================

/// Which of the two duellists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerId {
    /// Starts against the left wall
    First = 0,
    /// Starts against the right wall
    Second = 1,
}

impl PlayerId {
    /// Both players in update order.
    pub const ALL: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    /// The other player.
    #[inline]
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    /// True for the first player.
    #[inline]
    pub fn is_first(self) -> bool {
        self == PlayerId::First
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::First => write!(f, "P1"),
            PlayerId::Second => write!(f, "P2"),
        }
    }
}

// =============================================================================
// PER-PLAYER STORAGE
// =============================================================================

/// One value per player, indexable by [`PlayerId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPlayer<T> {
    /// Value for [`PlayerId::First`]
    pub first: T,
    /// Value for [`PlayerId::Second`]
    pub second: T,
}

impl<T> PerPlayer<T> {
    /// Build from both values.
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// Build by calling `f` for each player.
    pub fn from_fn(mut f: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            first: f(PlayerId::First),
            second: f(PlayerId::Second),
        }
    }

    /// Transform both values.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerPlayer<U> {
        PerPlayer {
            first: f(self.first),
            second: f(self.second),
        }
    }
}

impl<T> Index<PlayerId> for PerPlayer<T> {
    type Output = T;

    fn index(&self, id: PlayerId) -> &T {
        match id {
            PlayerId::First => &self.first,
            PlayerId::Second => &self.second,
        }
    }
}

impl<T> IndexMut<PlayerId> for PerPlayer<T> {
    fn index_mut(&mut self, id: PlayerId) -> &mut T {
        match id {
            PlayerId::First => &mut self.first,
            PlayerId::Second => &mut self.second,
        }
    }
}

// =============================================================================
// FACING
// =============================================================================

/// Direction a player's sprite faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Looking towards `wall_left`
    Left,
    /// Looking towards `wall_right`
    Right,
}

// =============================================================================
// ACTIVITY
// =============================================================================

/// What a player is doing this tick. Exactly one per player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Activity {
    /// On the ground, waiting for the action button
    Stand,
    /// Airborne under gravity
    Jump {
        /// Current vertical speed (positive = up)
        y_velocity: f64,
        /// Button is still held from the press that started this jump.
        /// Cleared once a release is observed; only then can a press dive.
        holding_from_takeoff: bool,
    },
    /// Dive-kicking; the only activity that can end a round
    Dive {
        /// Resolved on the first dive tick, then fixed for the dive
        direction: Option<DiveDirection>,
    },
}

impl Activity {
    /// Enter a jump at `y_velocity`.
    pub fn jump(y_velocity: f64) -> Self {
        Activity::Jump {
            y_velocity,
            holding_from_takeoff: true,
        }
    }

    /// Enter a dive with direction still unresolved.
    pub fn dive() -> Self {
        Activity::Dive { direction: None }
    }

    /// Variant tag without payload.
    pub fn kind(&self) -> ActivityKind {
        match self {
            Activity::Stand => ActivityKind::Stand,
            Activity::Jump { .. } => ActivityKind::Jump,
            Activity::Dive { .. } => ActivityKind::Dive,
        }
    }

    /// True while diving.
    #[inline]
    pub fn is_diving(&self) -> bool {
        matches!(self, Activity::Dive { .. })
    }

    fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.kind() as u8);
        match *self {
            Activity::Stand => {}
            Activity::Jump { y_velocity, holding_from_takeoff } => {
                hasher.update_f64(y_velocity);
                hasher.update_bool(holding_from_takeoff);
            }
            Activity::Dive { direction } => {
                hasher.update_u8(direction.map_or(u8::MAX, |d| d as u8));
            }
        }
    }
}

/// Activity tag, for events and logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActivityKind {
    /// [`Activity::Stand`]
    Stand = 0,
    /// [`Activity::Jump`]
    Jump = 1,
    /// [`Activity::Dive`]
    Dive = 2,
}

// =============================================================================
// PLAYER
// =============================================================================

/// State of a single player in the match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Which player this is
    pub id: PlayerId,

    /// Accumulated score across rounds
    pub score: u32,

    /// Horizontal position
    x: f64,

    /// Height above ground, `0.0` = standing on it
    height: f64,

    /// Current activity, replaced wholesale each tick
    activity: Activity,

    /// Action button as observed on the previous tick
    action_held: bool,
}

impl Player {
    /// Create a standing player at `x`.
    pub fn new(id: PlayerId, x: f64) -> Self {
        Self {
            id,
            score: 0,
            x,
            height: 0.0,
            activity: Activity::Stand,
            action_held: false,
        }
    }

    /// Horizontal position.
    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Height above ground.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Authoritative ground test.
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.height == 0.0
    }

    /// Current activity.
    #[inline]
    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Action button state seen on the previous tick.
    #[inline]
    pub fn action_held(&self) -> bool {
        self.action_held
    }

    /// Facing given the opponent's x.
    ///
    /// The first player faces right when strictly left of the second; the
    /// second player's facing is the inverse.
    pub fn facing(&self, opponent_x: f64) -> Facing {
        let (first_x, second_x) = match self.id {
            PlayerId::First => (self.x, opponent_x),
            PlayerId::Second => (opponent_x, self.x),
        };
        let first_faces_right = first_x < second_x;
        if first_faces_right == self.id.is_first() {
            Facing::Right
        } else {
            Facing::Left
        }
    }

    /// Add points.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Back to round-start stance at `x`.
    ///
    /// The previous action observation survives so a button held through
    /// the reset is not read as a fresh press.
    pub fn reset_to(&mut self, x: f64) {
        self.x = x;
        self.height = 0.0;
        self.activity = Activity::Stand;
    }

    /// Clamp an out-of-range position back into the arena.
    ///
    /// Returns true if anything was clamped.
    pub fn sanitize(&mut self, arena: &ArenaConfig) -> bool {
        let mut clamped = false;
        if self.height < 0.0 {
            self.height = 0.0;
            clamped = true;
        }
        if !arena.contains(self.x) {
            self.x = arena.clamp_x(self.x);
            clamped = true;
        }
        clamped
    }

    pub(crate) fn set_position(&mut self, x: f64, height: f64) {
        self.x = x;
        self.height = height;
    }

    pub(crate) fn set_activity(&mut self, activity: Activity) {
        self.activity = activity;
    }

    pub(crate) fn set_action_held(&mut self, held: bool) {
        self.action_held = held;
    }

    /// Hash this player's state.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u8(self.id as u8);
        hasher.update_u32(self.score);
        hasher.update_f64(self.x);
        hasher.update_f64(self.height);
        self.activity.hash_into(hasher);
        hasher.update_bool(self.action_held);
    }
}

// =============================================================================
// MATCH STATE
// =============================================================================

/// Complete state of a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    /// Ticks simulated so far
    pub tick: u64,

    /// Current round, starting at 1
    pub round: u32,

    /// Total simulated seconds (already scaled by game speed)
    pub elapsed: f64,

    /// Both players
    pub players: PerPlayer<Player>,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl MatchState {
    /// Create a match with both players at their round-start stance.
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            tick: 0,
            round: 1,
            elapsed: 0.0,
            players: PerPlayer::from_fn(|id| Player::new(id, config.arena.start_x(id))),
            pending_events: Vec::new(),
        }
    }

    /// Get a player.
    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Get a player mutably.
    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Current scores.
    pub fn scores(&self) -> PerPlayer<u32> {
        PerPlayer::new(self.players.first.score, self.players.second.score)
    }

    /// Facing of `id` against its opponent.
    pub fn facing(&self, id: PlayerId) -> Facing {
        self.players[id].facing(self.players[id.opponent()].x)
    }

    /// Move a player without any clamping.
    ///
    /// Out-of-range values are repaired on the next tick; a standing player
    /// placed above the ground starts falling.
    pub fn reposition(&mut self, id: PlayerId, x: f64, height: f64) {
        self.players[id].set_position(x, height);
    }

    /// End the round: both players back to their start stance.
    pub fn reset_round(&mut self, config: &MatchConfig) {
        for id in PlayerId::ALL {
            self.players[id].reset_to(config.arena.start_x(id));
        }
        self.round += 1;
    }

    /// Compute hash of current state.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.round, |hasher| {
            hasher.update_f64(self.elapsed);
            for id in PlayerId::ALL {
                self.players[id].hash_into(hasher);
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(PlayerId::First.opponent(), PlayerId::Second);
        assert_eq!(PlayerId::Second.opponent(), PlayerId::First);
    }

    #[test]
    fn test_per_player_index() {
        let mut scores = PerPlayer::new(1u32, 2u32);
        assert_eq!(scores[PlayerId::First], 1);
        scores[PlayerId::Second] += 5;
        assert_eq!(scores.second, 7);
        assert_eq!(scores.map(|s| s * 2), PerPlayer::new(2, 14));
    }

    #[test]
    fn test_facing_inverted_for_second_player() {
        let p1 = Player::new(PlayerId::First, 20.0);
        let p2 = Player::new(PlayerId::Second, 100.0);
        assert_eq!(p1.facing(p2.x()), Facing::Right);
        assert_eq!(p2.facing(p1.x()), Facing::Left);

        // Crossed over
        let p1 = Player::new(PlayerId::First, 120.0);
        let p2 = Player::new(PlayerId::Second, 40.0);
        assert_eq!(p1.facing(p2.x()), Facing::Left);
        assert_eq!(p2.facing(p1.x()), Facing::Right);

        // Same x: first faces left, second right
        let p1 = Player::new(PlayerId::First, 80.0);
        let p2 = Player::new(PlayerId::Second, 80.0);
        assert_eq!(p1.facing(p2.x()), Facing::Left);
        assert_eq!(p2.facing(p1.x()), Facing::Right);
    }

    #[test]
    fn test_sanitize_clamps() {
        let arena = ArenaConfig::default();
        let mut player = Player::new(PlayerId::First, 2.0);
        player.set_position(2.0, -4.0);

        assert!(player.sanitize(&arena));
        assert_eq!(player.x(), arena.wall_left);
        assert_eq!(player.height(), 0.0);
        assert!(player.on_ground());

        assert!(!player.sanitize(&arena));
    }

    #[test]
    fn test_reset_round() {
        let config = MatchConfig::default();
        let mut state = MatchState::new(&config);
        state.reposition(PlayerId::First, 70.0, 30.0);
        state.player_mut(PlayerId::First).set_activity(Activity::dive());
        state.player_mut(PlayerId::Second).set_activity(Activity::jump(10.0));

        state.reset_round(&config);

        assert_eq!(state.round, 2);
        for id in PlayerId::ALL {
            let player = state.player(id);
            assert_eq!(player.x(), config.arena.start_x(id));
            assert_eq!(player.height(), 0.0);
            assert_eq!(*player.activity(), Activity::Stand);
        }
    }

    #[test]
    fn test_hash_tracks_activity() {
        let config = MatchConfig::default();
        let mut a = MatchState::new(&config);
        let b = MatchState::new(&config);
        assert_eq!(a.compute_hash(), b.compute_hash());

        a.player_mut(PlayerId::Second).set_activity(Activity::jump(0.0));
        assert_ne!(a.compute_hash(), b.compute_hash());
    }
}
