//! Player Activity State Machine
//!
//! Stand, Jump and Dive, each deciding its own successor once per tick.
//!
//! ## Transitions
//!
//! ```text
//!            press (edge)                   release, then press
//!   ┌───────┐ ──────────► ┌──────┐ ─────────────────────────► ┌──────┐
//!   │ STAND │             │ JUMP │                            │ DIVE │
//!   └───────┘ ◄────────── └──────┘ ◄───────────────────────── └──────┘
//!       ▲        landed               wall bounce (full jump)     │
//!       └─────────────────────────────────────────────────────────┘
//!                     landed, or contact (round over)
//! ```
//!
//! [`advance`] is a pure function from (activity, position, inputs) to the
//! next activity and position. [`Player::update`] wraps it with the
//! bookkeeping that lives on the player: action edge detection, and
//! dropping contact reports unless the player was already diving.

use tracing::debug;

use crate::core::kinematics::{integrate_dive, integrate_jump, DiveDirection};
use crate::game::config::{ArenaConfig, MatchConfig};
use crate::game::contact::ContactReport;
use crate::game::outcome::{resolve_contact, Judgement};
use crate::game::state::{Activity, Player};

/// Action button as seen by one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Button {
    /// Held down this tick
    pub pressed: bool,
    /// Held down this tick but not the previous one
    pub just_pressed: bool,
}

/// Read-only view of the opponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpponentView {
    /// Opponent's x
    pub x: f64,
    /// Opponent is currently diving
    pub diving: bool,
}

impl OpponentView {
    /// Snapshot a player.
    pub fn of(player: &Player) -> Self {
        Self {
            x: player.x(),
            diving: player.activity().is_diving(),
        }
    }
}

/// Everything one activity step may read.
#[derive(Clone, Copy, Debug)]
pub struct StepInput {
    /// Scaled seconds since the previous tick
    pub dt: f64,
    /// Action button
    pub button: Button,
    /// Contacts reported this tick; empty unless already diving
    pub contact: ContactReport,
    /// The other player
    pub opponent: OpponentView,
}

/// Result of one activity step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Activity for the next tick
    pub activity: Activity,
    /// New x
    pub x: f64,
    /// New height
    pub height: f64,
    /// Set when this step ended the round
    pub judgement: Option<Judgement>,
}

impl Step {
    fn stay(activity: Activity, x: f64, height: f64) -> Self {
        Self { activity, x, height, judgement: None }
    }
}

/// Pick a dive direction.
///
/// Pinned against a wall means diving away from it; otherwise dive towards
/// the opponent (left when level with them).
pub fn resolve_dive_direction(x: f64, opponent_x: f64, arena: &ArenaConfig) -> DiveDirection {
    if x <= arena.wall_left {
        DiveDirection::Right
    } else if x >= arena.wall_right {
        DiveDirection::Left
    } else if x < opponent_x {
        DiveDirection::Right
    } else {
        DiveDirection::Left
    }
}

/// Advance one activity by one tick.
pub fn advance(activity: Activity, x: f64, height: f64, input: &StepInput, config: &MatchConfig) -> Step {
    match activity {
        Activity::Stand => advance_stand(x, height, input, config),
        Activity::Jump { y_velocity, holding_from_takeoff } => {
            advance_jump(y_velocity, holding_from_takeoff, x, height, input, config)
        }
        Activity::Dive { direction } => advance_dive(direction, x, height, input, config),
    }
}

fn advance_stand(x: f64, height: f64, input: &StepInput, config: &MatchConfig) -> Step {
    if height < 0.0 {
        return Step::stay(Activity::Stand, x, 0.0);
    }

    // Put above the ground by something else: fall.
    if height > 0.0 {
        return Step::stay(Activity::jump(0.0), x, height);
    }

    if input.button.just_pressed {
        return Step::stay(Activity::jump(config.physics.jump_velocity), x, height);
    }

    Step::stay(Activity::Stand, x, height)
}

fn advance_jump(
    y_velocity: f64,
    holding_from_takeoff: bool,
    x: f64,
    height: f64,
    input: &StepInput,
    config: &MatchConfig,
) -> Step {
    let (new_height, new_velocity) =
        integrate_jump(height, y_velocity, config.physics.gravity, input.dt);

    if new_height <= 0.0 {
        return Step::stay(Activity::Stand, x, 0.0);
    }

    let mut holding = holding_from_takeoff;
    if holding {
        if !input.button.pressed {
            holding = false;
        }
    } else if input.button.pressed {
        return Step::stay(Activity::dive(), x, new_height);
    }

    Step::stay(
        Activity::Jump {
            y_velocity: new_velocity,
            holding_from_takeoff: holding,
        },
        x,
        new_height,
    )
}

fn advance_dive(
    direction: Option<DiveDirection>,
    x: f64,
    height: f64,
    input: &StepInput,
    config: &MatchConfig,
) -> Step {
    let arena = &config.arena;
    let direction = direction.unwrap_or_else(|| {
        let resolved = resolve_dive_direction(x, input.opponent.x, arena);
        debug!("Dive from x={:.2} resolved {:?}", x, resolved);
        resolved
    });

    let (new_x, new_height) = integrate_dive(
        x,
        height,
        config.physics.dive_velocity_x,
        config.physics.dive_velocity_y,
        direction,
        input.dt,
    );

    // Contacts describe where we were before this move, so a hit is seen
    // one tick after the overlap happened.
    if let Some(judgement) = resolve_contact(input.contact, input.opponent.diving) {
        return Step {
            activity: Activity::Stand,
            x: new_x,
            height: new_height,
            judgement: Some(judgement),
        };
    }

    if new_height <= 0.0 {
        return Step::stay(Activity::Stand, arena.clamp_x(new_x), 0.0);
    }

    // Wall bounce: diving into a wall springs back into a full jump.
    if new_x < arena.wall_left {
        return Step::stay(Activity::jump(config.physics.jump_velocity), arena.wall_left, new_height);
    }
    if new_x > arena.wall_right {
        return Step::stay(Activity::jump(config.physics.jump_velocity), arena.wall_right, new_height);
    }

    Step::stay(Activity::Dive { direction: Some(direction) }, new_x, new_height)
}

impl Player {
    /// Run this player's activity for one tick.
    ///
    /// `contact` is this tick's report for the player; it only counts while
    /// diving. Returns a judgement if the player's dive ended the round.
    pub fn update(
        &mut self,
        dt: f64,
        action_pressed: bool,
        contact: ContactReport,
        opponent: OpponentView,
        config: &MatchConfig,
    ) -> Option<Judgement> {
        let button = Button {
            pressed: action_pressed,
            just_pressed: action_pressed && !self.action_held(),
        };
        self.set_action_held(action_pressed);

        let current = *self.activity();
        // Any contact ends the round, so nothing carries between dive ticks.
        // Reports seen before the dive started never count.
        let contact = if current.is_diving() {
            contact
        } else {
            ContactReport::NONE
        };

        let input = StepInput { dt, button, contact, opponent };
        let step = advance(current, self.x(), self.height(), &input, config);

        self.set_position(step.x, step.height);
        self.set_activity(step.activity);

        if step.activity.kind() != current.kind() {
            debug!(
                "{} {:?} -> {:?} at x={:.2} h={:.2}",
                self.id,
                current.kind(),
                step.activity.kind(),
                step.x,
                step.height
            );
        }

        step.judgement
    }
}
