use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the rules, the cue and the settle check.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Grace period before rule logic runs, so freshly spawned balls are not
    /// misread as moving. Re-armed after a cue-ball respawn.
    pub pre_game_seconds: f32,
    /// Delay between game over and the menu being opened.
    pub after_game_seconds: f32,
    /// Cue lockout armed by a reset, so the click on "new game" is not a shot.
    pub reset_suppression_seconds: f32,
    pub turn_message_seconds: f32,
    pub assignment_message_seconds: f32,
    pub win_message_seconds: f32,
    /// Balls of one suit a player must have pocketed before the eight counts
    /// as a legal win.
    pub balls_per_suit: u32,
    /// Exponent of the concave drag-to-pull mapping (`distance^(1/tension)`).
    pub tension_power: f32,
    /// Total ball speed at or below which the table counts as at rest.
    /// `0.0` demands exact rest, which the physics reports once bodies sleep.
    pub settle_epsilon: f32,
    /// After this long in motion every ball is stopped outright.
    /// `None` waits forever.
    pub settle_timeout_seconds: Option<f32>,
    /// Physics impulse units per unit of shot power.
    pub impulse_scale: f32,
    /// Collected-ball events buffered between ticks.
    pub event_queue_capacity: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            pre_game_seconds: 0.5,
            after_game_seconds: 4.0,
            reset_suppression_seconds: 0.2,
            turn_message_seconds: 2.0,
            assignment_message_seconds: 2.0,
            win_message_seconds: 4.0,
            balls_per_suit: 7,
            tension_power: 2.0,
            settle_epsilon: 0.0,
            settle_timeout_seconds: Some(30.0),
            impulse_scale: 4000.0,
            event_queue_capacity: 32,
        }
    }
}

impl RulesConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("pre_game_seconds", self.pre_game_seconds),
            ("after_game_seconds", self.after_game_seconds),
            ("reset_suppression_seconds", self.reset_suppression_seconds),
            ("turn_message_seconds", self.turn_message_seconds),
            ("assignment_message_seconds", self.assignment_message_seconds),
            ("win_message_seconds", self.win_message_seconds),
            ("settle_epsilon", self.settle_epsilon),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    requirement: "a non-negative number",
                    value,
                });
            }
        }

        let positive = [
            ("tension_power", self.tension_power),
            ("impulse_scale", self.impulse_scale),
            ("settle_timeout_seconds", self.settle_timeout_seconds.unwrap_or(1.0)),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    requirement: "greater than zero",
                    value,
                });
            }
        }

        if self.event_queue_capacity == 0 {
            return Err(ConfigError::OutOfRange {
                field: "event_queue_capacity",
                requirement: "at least 1",
                value: 0.0,
            });
        }
        Ok(())
    }
}
