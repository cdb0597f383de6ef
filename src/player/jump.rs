use avian3d::prelude::LinearVelocity;
use bevy::prelude::*;

use super::config::MovementConfig;
use super::state::MovementState;

/// Vertical launch speed that peaks at `jump_height` under scaled gravity
pub fn jump_launch_speed(gravity_multiplier: f32, gravity_magnitude: f32, jump_height: f32) -> f32 {
    (2.0 * gravity_multiplier * gravity_magnitude * jump_height)
        .max(0.0)
        .sqrt()
}

/// Starts a jump if the body is grounded, returning the velocity change to apply.
/// Leaves the state untouched otherwise.
pub fn try_jump(
    state: &mut MovementState,
    config: &MovementConfig,
    gravity_magnitude: f32,
) -> Option<Vec3> {
    if !state.is_grounded {
        return None;
    }

    let launch = jump_launch_speed(config.gravity_multiplier, gravity_magnitude, config.jump_height);
    state.in_jump_startup = true;
    Some(Vec3::Y * launch)
}

/// Runs a jump against a body's velocity. Returns whether the body left the ground.
pub fn launch_body(
    state: &mut MovementState,
    config: &MovementConfig,
    velocity: &mut LinearVelocity,
    gravity_magnitude: f32,
) -> bool {
    match try_jump(state, config, gravity_magnitude) {
        Some(launch) => {
            velocity.0 += launch;
            true
        }
        None => false,
    }
}
