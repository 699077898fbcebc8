//! Kinematics
//!
//! Pure integration functions for the two kinds of motion a player has:
//! a gravity-driven jump arc and a linear dive.
//!
//! ## Update Order
//!
//! Both functions integrate position with the **pre-update** velocity and
//! only then advance velocity (explicit Euler). Landing and hit timing
//! depend on this order, so it must not be swapped.
//!
//! Neither function clamps. Callers own the `height >= 0` and wall
//! invariants.

use serde::{Deserialize, Serialize};

/// Horizontal direction of a dive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DiveDirection {
    /// Towards `wall_left`
    Left = 0,
    /// Towards `wall_right`
    Right = 1,
}

impl DiveDirection {
    /// Sign applied to horizontal dive speed.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            DiveDirection::Left => -1.0,
            DiveDirection::Right => 1.0,
        }
    }
}

/// Advance a jump arc by `dt` seconds.
///
/// Returns `(new_height, new_velocity)` where
/// `new_height = height + y_velocity * dt` and
/// `new_velocity = y_velocity + gravity * dt`.
///
/// `gravity` is negative (pulls towards the ground).
#[inline]
pub fn integrate_jump(height: f64, y_velocity: f64, gravity: f64, dt: f64) -> (f64, f64) {
    let new_height = height + y_velocity * dt;
    let new_velocity = y_velocity + gravity * dt;
    (new_height, new_velocity)
}

/// Advance a dive by `dt` seconds.
///
/// Horizontal motion is linear at `vx` in `direction`; vertical motion is a
/// constant-rate descent at `vy`. Returns `(new_x, new_height)`.
#[inline]
pub fn integrate_dive(
    x: f64,
    height: f64,
    vx: f64,
    vy: f64,
    direction: DiveDirection,
    dt: f64,
) -> (f64, f64) {
    let new_x = x + vx * dt * direction.sign();
    let new_height = height - vy * dt;
    (new_x, new_height)
}

/// Time for a jump launched from the ground at `velocity` to return to it,
/// in the continuous limit (`2v / |g|`).
pub fn airtime(velocity: f64, gravity: f64) -> f64 {
    2.0 * velocity / gravity.abs()
}
