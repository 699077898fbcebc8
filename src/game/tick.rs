//! Authoritative Simulation Tick
//!
//! One call advances both players by `dt` seconds and settles the round if
//! a dive connected. Single-threaded and allocation-light; the whole
//! two-player update is one atomic step.

use tracing::{info, warn};

use crate::game::activity::OpponentView;
use crate::game::config::MatchConfig;
use crate::game::events::GameEvent;
use crate::game::input::TickInput;
use crate::game::outcome::RoundOutcome;
use crate::game::state::{ActivityKind, Facing, MatchState, PerPlayer, PlayerId};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Round decided this tick, if any
    pub outcome: Option<RoundOutcome>,
}

/// What a presenter last saw of a player.
#[derive(Clone, Copy, PartialEq)]
struct Snapshot {
    x: f64,
    height: f64,
    facing: Facing,
    kind: ActivityKind,
}

fn snapshot(state: &MatchState) -> PerPlayer<Snapshot> {
    PerPlayer::from_fn(|id| {
        let player = state.player(id);
        Snapshot {
            x: player.x(),
            height: player.height(),
            facing: state.facing(id),
            kind: player.activity().kind(),
        }
    })
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The match state (will be mutated)
/// * `dt` - Scaled seconds since the previous tick; must be positive
/// * `input` - Button levels and contact reports for this tick
/// * `config` - Match configuration
///
/// # Ordering
///
/// The first player updates before the second, and the second sees the
/// first's post-update position. If the first player's dive ends the round
/// the second player's update is skipped: the round is already over.
pub fn tick(state: &mut MatchState, dt: f64, input: &TickInput, config: &MatchConfig) -> TickResult {
    let mut result = TickResult::default();

    if !(dt > 0.0) || !dt.is_finite() {
        warn!("Ignoring tick with dt={}", dt);
        return result;
    }

    // 0. Advance counters
    state.tick += 1;
    state.elapsed += dt;

    #[cfg(feature = "debug-tracing")]
    tracing::trace!("Tick {} dt={:.4}", state.tick, dt);

    let before = snapshot(state);

    // 1. Repair anything moved out of range from outside
    for id in PlayerId::ALL {
        let player = state.player_mut(id);
        let (x, height) = (player.x(), player.height());
        if player.sanitize(&config.arena) {
            warn!("{} out of range at x={:.2} h={:.2}, clamped", id, x, height);
        }
    }

    // 2. Update players in order
    for id in PlayerId::ALL {
        let opponent = OpponentView::of(state.player(id.opponent()));
        let judgement = state.player_mut(id).update(
            dt,
            input.action[id],
            input.contact[id],
            opponent,
            config,
        );

        if let Some(judgement) = judgement {
            result.outcome = Some(RoundOutcome::new(id, judgement));
            // A skipped update still observes its button, or a release on
            // this tick would be missed by the next edge check.
            if id.is_first() {
                let skipped = id.opponent();
                state.player_mut(skipped).set_action_held(input.action[skipped]);
            }
            break;
        }
    }

    // 3. Settle the round
    if let Some(outcome) = result.outcome {
        end_round(state, outcome, config);
    }

    // 4. Report what changed
    push_change_events(state, &before);

    result.events = state.take_events();
    result
}

/// Award points and reset both players for the next round.
fn end_round(state: &mut MatchState, outcome: RoundOutcome, config: &MatchConfig) {
    let awards = outcome.awards();
    for id in PlayerId::ALL {
        state.player_mut(id).add_score(awards[id]);
    }

    let round = state.round;
    let scores = state.scores();
    info!(
        "Round {} won: {} (score {}-{})",
        round, outcome, scores.first, scores.second
    );

    state.reset_round(config);
    state.push_event(GameEvent::round_ended(state.tick, outcome, round, scores));
}

fn push_change_events(state: &mut MatchState, before: &PerPlayer<Snapshot>) {
    let after = snapshot(state);
    let tick = state.tick;

    // Activity changes first so presenters can swap sprites before moving them.
    let mut events = Vec::new();
    for id in PlayerId::ALL {
        let (old, new) = (before[id], after[id]);
        if old.kind != new.kind {
            events.push(GameEvent::activity_changed(tick, id, old.kind, new.kind));
        }
    }
    for id in PlayerId::ALL {
        let (old, new) = (before[id], after[id]);
        if old.x != new.x || old.height != new.height || old.facing != new.facing {
            events.push(GameEvent::position_changed(tick, id, new.x, new.height, new.facing));
        }
    }

    // Round results go last, after the reset positions.
    let round_events = state.take_events();
    for event in events.into_iter().chain(round_events) {
        state.push_event(event);
    }
}
