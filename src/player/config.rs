use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`MovementConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse movement config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("`max_slope_angle` must lie within [0, π/2] radians (got {0})")]
    SlopeAngleOutOfRange(f32),
}

/// Movement tuning, fixed once the body is spawned
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed in m/s
    pub base_speed: f32,
    /// Sprinting speed in m/s
    pub sprint_speed: f32,
    /// Extra reach of the ground probe below the body's base
    pub grounded_distance: f32,
    /// Linear damping while standing on walkable ground
    pub grounded_linear_damping: f32,
    /// Steepest standable surface, in radians
    pub max_slope_angle: f32,
    /// Jump apex height in meters
    pub jump_height: f32,
    /// Scale of movement acceleration while airborne. 1 = reach move speed in 1s, 4 = 0.25s
    pub air_control: f32,
    /// Falling speed above which gravity stops accelerating the body
    pub terminal_velocity: f32,
    /// Scale applied to world gravity while gravity is enabled
    pub gravity_multiplier: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 4.0,
            sprint_speed: 6.0,
            grounded_distance: 0.01,
            grounded_linear_damping: 25.0,
            max_slope_angle: 45.0_f32.to_radians(),
            jump_height: 2.0,
            air_control: 5.0,
            terminal_velocity: 100.0,
            gravity_multiplier: 1.0,
        }
    }
}

impl MovementConfig {
    /// Parses a RON document, filling omitted fields with defaults, and validates it
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("base_speed", self.base_speed),
            ("sprint_speed", self.sprint_speed),
            ("grounded_distance", self.grounded_distance),
            ("grounded_linear_damping", self.grounded_linear_damping),
            ("max_slope_angle", self.max_slope_angle),
            ("jump_height", self.jump_height),
            ("air_control", self.air_control),
            ("terminal_velocity", self.terminal_velocity),
            ("gravity_multiplier", self.gravity_multiplier),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.max_slope_angle > FRAC_PI_2 {
            return Err(ConfigError::SlopeAngleOutOfRange(self.max_slope_angle));
        }

        Ok(())
    }
}

/// Capsule dimensions of the controlled body
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BodyShape {
    pub radius: f32,
    /// Full height including both hemispheres
    pub height: f32,
}

impl Default for BodyShape {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
        }
    }
}

impl BodyShape {
    /// Length of the capsule's inner segment, as Avian's capsule constructor expects
    pub fn segment_length(&self) -> f32 {
        (self.height - self.radius * 2.0).max(0.0)
    }

    /// Bottom of the capsule for a body centered at `center`
    pub fn base(&self, center: Vec3) -> Vec3 {
        center - Vec3::Y * (self.height * 0.5)
    }
}
