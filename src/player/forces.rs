use std::f32::consts::FRAC_PI_2;

use avian3d::prelude::*;
use bevy::prelude::*;

use super::config::MovementConfig;
use super::state::*;
use crate::physics::SimulatedDamping;

/// Removes the component of `vector` along `normal`. Degenerate normals leave it unchanged.
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    let length_squared = normal.length_squared();
    if length_squared <= f32::EPSILON {
        return vector;
    }
    vector - normal * (vector.dot(normal) / length_squared)
}

/// Scale on a target speed that cancels the per-step decay `v * (1 - d / f)`,
/// so constant acceleration settles at exactly the target speed.
///
/// Returns zero when there is no damping to compensate, and zero when `damping`
/// reaches the step frequency: the integrator stops the body every step there
/// and no finite acceleration can hold a speed.
pub fn drag_compensation_multiplier(damping: f32, step_frequency: f32) -> f32 {
    if damping <= 0.0 || damping >= step_frequency {
        return 0.0;
    }
    damping / ((step_frequency - damping) / step_frequency)
}

/// Horizontal direction pointing out of (down) a slope, unit length
pub fn slope_outward_direction(normal: Vec3) -> Vec3 {
    let along_slope = normal.cross(Vec3::Y);
    (Quat::from_rotation_y(FRAC_PI_2) * along_slope).normalize_or_zero()
}

/// Turns a move direction that pushes into a slope so it runs along the slope's
/// contour instead. The result has no component along the slope normal.
pub fn redirect_along_slope(move_direction: Vec3, normal: Vec3) -> Vec3 {
    let outward = slope_outward_direction(normal);
    let magnitude = move_direction.length();
    if outward == Vec3::ZERO || magnitude <= f32::EPSILON {
        return move_direction;
    }

    let angle_to_slope = move_direction.angle_between(outward) - FRAC_PI_2;
    move_direction + outward * (angle_to_slope.sin() * magnitude)
}

/// Movement acceleration for one fixed step, based on the last ground probe.
/// Refreshes `effective_speed` while grounded.
pub fn movement_acceleration(
    state: &mut MovementState,
    config: &MovementConfig,
    damping: f32,
    step_frequency: f32,
) -> Vec3 {
    let slope_direction = project_on_plane(state.move_direction, state.ground.normal);

    if state.is_grounded {
        state.effective_speed = if state.sprint_held {
            config.sprint_speed
        } else {
            config.base_speed
        };
        let multiplier = drag_compensation_multiplier(damping, step_frequency);
        return state.effective_speed * multiplier * slope_direction;
    }

    let air_speed = state.effective_speed * config.air_control;
    if state.on_steep_slope && slope_direction.y > 0.0 {
        air_speed * redirect_along_slope(state.move_direction, state.ground.normal)
    } else {
        air_speed * state.move_direction
    }
}

/// Counter-acceleration that bleeds horizontal speed above the move speed.
/// Zero below the threshold.
pub fn air_drag_acceleration(velocity: Vec3, effective_speed: f32, air_control: f32) -> Vec3 {
    let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
    if horizontal.length() < effective_speed {
        return Vec3::ZERO;
    }
    effective_speed * air_control * -horizontal.normalize_or_zero()
}

/// Acceleration layered on top of native gravity so the total is `multiplier * |g|`
pub fn extra_gravity_acceleration(gravity_multiplier: f32, gravity_magnitude: f32) -> Vec3 {
    (gravity_multiplier - 1.0) * gravity_magnitude * Vec3::NEG_Y
}

/// Total acceleration for one fixed step. Every term sees the velocity the step
/// started with, so air drag is not triggered by this step's own movement force.
pub fn step_acceleration(
    state: &mut MovementState,
    config: &MovementConfig,
    damping: f32,
    step_frequency: f32,
    velocity: Vec3,
    gravity_magnitude: f32,
) -> Vec3 {
    let mut acceleration = movement_acceleration(state, config, damping, step_frequency);

    if !state.is_grounded {
        acceleration += air_drag_acceleration(velocity, state.effective_speed, config.air_control);
    }
    if state.gravity_enabled {
        acceleration += extra_gravity_acceleration(config.gravity_multiplier, gravity_magnitude);
    }

    acceleration
}

/// Applies movement, air drag and extra gravity as one velocity change per fixed step
pub fn apply_step_forces(
    mut query: Query<(
        &MovementConfig,
        &SimulatedDamping,
        &mut MovementState,
        &mut LinearVelocity,
    )>,
    gravity: Res<Gravity>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.timestep().as_secs_f32();
    let step_frequency = 1.0 / dt;
    let gravity_magnitude = gravity.0.length();

    for (config, damping, mut state, mut velocity) in &mut query {
        let acceleration = step_acceleration(
            &mut state,
            config,
            damping.0,
            step_frequency,
            velocity.0,
            gravity_magnitude,
        );
        velocity.0 += acceleration * dt;
    }
}
