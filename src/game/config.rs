//! Match Configuration
//!
//! Tuning constants for the arena, physics and clock. Values are a tuning
//! choice rather than a behavioural contract; defaults match the standard
//! Footsmash feel (one screen wide, roughly 30 Hz host frames).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::contact::HitboxLayout;
use crate::game::state::PlayerId;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `wall_left` must be strictly less than `wall_right`
    #[error("arena walls out of order: left {left} >= right {right}")]
    WallsOutOfOrder {
        /// Configured left wall
        left: f64,
        /// Configured right wall
        right: f64,
    },

    /// Start positions would fall outside the arena or cross over
    #[error("start inset {0} places players outside the arena")]
    InsetOutOfRange(f64),

    /// Gravity must pull downwards
    #[error("gravity must be negative, got {0}")]
    NonNegativeGravity(f64),

    /// A speed-like value must be strictly positive
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Field name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Horizontal bounds of the arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// X of the left wall
    pub wall_left: f64,
    /// X of the right wall
    pub wall_right: f64,
    /// Distance from its wall each player starts a round at
    pub start_inset: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            wall_left: 5.0,
            wall_right: 155.0,
            start_inset: 22.0,
        }
    }
}

impl ArenaConfig {
    /// Round-start x for a player.
    pub fn start_x(&self, player: PlayerId) -> f64 {
        match player {
            PlayerId::First => self.wall_left + self.start_inset,
            PlayerId::Second => self.wall_right - self.start_inset,
        }
    }

    /// Clamp an x coordinate to the walls.
    #[inline]
    pub fn clamp_x(&self, x: f64) -> f64 {
        x.max(self.wall_left).min(self.wall_right)
    }

    /// Check if x lies within the walls (inclusive).
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.wall_left && x <= self.wall_right
    }
}

/// Motion tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration while jumping (negative)
    pub gravity: f64,
    /// Initial upward speed of a jump (~full screen height)
    pub jump_velocity: f64,
    /// Horizontal dive speed
    pub dive_velocity_x: f64,
    /// Constant descent rate during a dive
    pub dive_velocity_y: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -300.0,
            jump_velocity: 250.0,
            dive_velocity_x: 100.0,
            dive_velocity_y: 100.0,
        }
    }
}

/// Configuration for match simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Arena bounds and start positions
    pub arena: ArenaConfig,
    /// Motion tuning
    pub physics: PhysicsConfig,
    /// Multiplier applied to host clock deltas ("turbo mode" above 1.0)
    pub game_speed: f64,
    /// Body regions used by the reference hitbox detector
    pub hitboxes: HitboxLayout,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            physics: PhysicsConfig::default(),
            game_speed: 1.0,
            hitboxes: HitboxLayout::default(),
        }
    }
}

impl MatchConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every tuning constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        if arena.wall_left >= arena.wall_right {
            return Err(ConfigError::WallsOutOfOrder {
                left: arena.wall_left,
                right: arena.wall_right,
            });
        }

        // Both starts inside the walls and the first strictly left of the second.
        let width = arena.wall_right - arena.wall_left;
        if arena.start_inset < 0.0 || arena.start_inset * 2.0 >= width {
            return Err(ConfigError::InsetOutOfRange(arena.start_inset));
        }

        if self.physics.gravity >= 0.0 {
            return Err(ConfigError::NonNegativeGravity(self.physics.gravity));
        }

        let positives = [
            ("jump_velocity", self.physics.jump_velocity),
            ("dive_velocity_x", self.physics.dive_velocity_x),
            ("dive_velocity_y", self.physics.dive_velocity_y),
            ("game_speed", self.game_speed),
        ];
        for (name, value) in positives {
            // Written as a negated comparison so NaN is rejected too.
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_start_positions() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.start_x(PlayerId::First), 27.0);
        assert_eq!(arena.start_x(PlayerId::Second), 133.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = MatchConfig::from_json_str(
            r#"{ "game_speed": 10.0, "physics": { "gravity": -500.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.game_speed, 10.0);
        assert_eq!(config.physics.gravity, -500.0);
        assert_eq!(config.physics.jump_velocity, 250.0);
        assert_eq!(config.arena, ArenaConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = MatchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(MatchConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let mut config = MatchConfig::default();
        config.physics.gravity = 300.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonNegativeGravity(_))
        ));

        let mut config = MatchConfig::default();
        config.arena.wall_left = 200.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WallsOutOfOrder { .. })
        ));

        let mut config = MatchConfig::default();
        config.arena.start_inset = 80.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InsetOutOfRange(_))
        ));

        let mut config = MatchConfig::default();
        config.game_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "game_speed", .. })
        ));

        let mut config = MatchConfig::default();
        config.physics.dive_velocity_x = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            MatchConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            MatchConfig::load("/nonexistent/footsmash.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
