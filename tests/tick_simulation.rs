//! Drives the controller's per-tick functions over many fixed steps, without an App,
//! to check the movement model settles where it should.

use bevy::prelude::*;
use bevy_rigid_movement::physics::{GroundHit, classify_ground, damped_velocity};
use bevy_rigid_movement::player::{
    MovementConfig, MovementPhase, MovementState, extra_gravity_acceleration, jump_launch_speed,
    move_direction, movement_acceleration, resolve_phase, step_acceleration, try_jump,
};

const STEP_FREQUENCY: f32 = 64.0;
const GRAVITY: f32 = 9.81;

fn horizontal_speed(velocity: Vec3) -> f32 {
    Vec2::new(velocity.x, velocity.z).length()
}

fn flat_ground() -> GroundHit {
    GroundHit::new(Vec3::ZERO, Vec3::Y, 0.05)
}

/// Normal of a slope rising toward -Z
fn slope_normal(angle: f32) -> Vec3 {
    Vec3::new(0.0, angle.cos(), angle.sin())
}

#[test]
fn ground_speed_settles_at_move_speed_for_any_damping() {
    let dt = 1.0 / STEP_FREQUENCY;

    for damping in [5.0, 25.0, 50.0] {
        let config = MovementConfig {
            grounded_linear_damping: damping,
            ..default()
        };
        let mut state = MovementState {
            move_direction: move_direction(Vec2::Y, 0.7),
            ground: flat_ground(),
            is_grounded: true,
            ..default()
        };

        let mut velocity = Vec3::ZERO;
        for _ in 0..2000 {
            velocity += movement_acceleration(&mut state, &config, damping, STEP_FREQUENCY) * dt;
            velocity = damped_velocity(velocity, damping, dt);
        }

        let speed = horizontal_speed(velocity);
        assert!(
            (speed - config.base_speed).abs() < 1e-2,
            "damping {damping}: settled at {speed}"
        );
        assert!(velocity.y.abs() < 1e-4);
    }
}

#[test]
fn sprint_speed_is_reached_while_sprint_is_held() {
    let dt = 1.0 / STEP_FREQUENCY;
    let config = MovementConfig::default();
    let damping = config.grounded_linear_damping;
    let mut state = MovementState {
        move_direction: move_direction(Vec2::new(1.0, 0.0), 0.0),
        ground: flat_ground(),
        is_grounded: true,
        sprint_held: true,
        ..default()
    };

    let mut velocity = Vec3::ZERO;
    for _ in 0..1000 {
        velocity += movement_acceleration(&mut state, &config, damping, STEP_FREQUENCY) * dt;
        velocity = damped_velocity(velocity, damping, dt);
    }

    assert!((horizontal_speed(velocity) - config.sprint_speed).abs() < 1e-2);
}

#[test]
fn jump_peaks_at_configured_height() {
    let dt = 1e-4;

    for (gravity_multiplier, jump_height) in [(1.0, 2.0), (2.5, 0.5), (0.5, 3.0)] {
        let launch = jump_launch_speed(gravity_multiplier, GRAVITY, jump_height);
        let acceleration = -GRAVITY + extra_gravity_acceleration(gravity_multiplier, GRAVITY).y;

        // Closed form first: v² / 2a
        let apex = launch * launch / (2.0 * -acceleration);
        assert!((apex - jump_height).abs() < 1e-3);

        let mut height = 0.0_f32;
        let mut vertical = launch;
        while vertical > 0.0 {
            vertical += acceleration * dt;
            height += vertical * dt;
        }
        assert!(
            (height - jump_height).abs() < 1e-2,
            "g×{gravity_multiplier}: peaked at {height}, wanted {jump_height}"
        );
    }
}

#[test]
fn air_drag_bleeds_speed_without_oscillating() {
    let dt = 1.0 / STEP_FREQUENCY;
    let config = MovementConfig::default();
    let mut state = MovementState {
        effective_speed: config.base_speed,
        ..default()
    };

    let mut velocity = Vec3::new(9.0, 2.0, 3.0);
    let mut previous = horizontal_speed(velocity);
    let mut settled: Option<f32> = None;

    for _ in 0..500 {
        let acceleration =
            step_acceleration(&mut state, &config, 0.0, STEP_FREQUENCY, velocity, GRAVITY);
        velocity += acceleration * dt;

        let speed = horizontal_speed(velocity);
        match settled {
            None if speed < state.effective_speed => settled = Some(speed),
            None => assert!(speed < previous, "speed rose from {previous} to {speed}"),
            Some(rest) => assert_eq!(speed, rest),
        }
        previous = speed;
        assert!(velocity.x > 0.0 && velocity.z > 0.0, "drag reversed direction");
    }

    assert!(settled.is_some());
}

#[test]
fn steep_slope_climb_force_stays_tangent() {
    let config = MovementConfig::default();
    let normal = slope_normal(60f32.to_radians());
    let contact = classify_ground(&GroundHit::new(Vec3::ZERO, normal, 0.05), config.max_slope_angle);
    assert!(contact.steep && !contact.grounded);

    for step in 0..16 {
        let yaw = -1.4 + 2.8 * step as f32 / 15.0;
        let mut state = MovementState {
            move_direction: move_direction(Vec2::Y, yaw),
            ground: GroundHit::new(Vec3::ZERO, normal, 0.05),
            is_grounded: contact.grounded,
            on_steep_slope: contact.steep,
            effective_speed: config.base_speed,
            ..default()
        };

        let acceleration = movement_acceleration(&mut state, &config, 0.0, STEP_FREQUENCY);
        assert!(
            acceleration.dot(normal).abs() < 1e-4,
            "yaw {yaw}: {acceleration} pushes into the slope"
        );
    }
}

#[test]
fn jump_requires_ground() {
    let config = MovementConfig::default();
    let mut state = MovementState {
        move_input: Vec2::Y,
        effective_speed: 4.0,
        ..default()
    };
    let before = state.clone();

    assert!(try_jump(&mut state, &config, GRAVITY).is_none());
    assert_eq!(state, before);
}

#[test]
fn jump_startup_lasts_until_the_first_airborne_frame() {
    let config = MovementConfig::default();
    let contact = classify_ground(&flat_ground(), config.max_slope_angle);
    let mut state = MovementState {
        ground: flat_ground(),
        is_grounded: contact.grounded,
        on_steep_slope: contact.steep,
        ..default()
    };

    let stable = resolve_phase(&mut state, &config, 0.0);
    assert_eq!(stable.phase, MovementPhase::GroundedStable);
    assert!(!stable.gravity_enabled);

    let launch = try_jump(&mut state, &config, GRAVITY).unwrap();
    assert!(state.in_jump_startup);

    // Probe still touching ground on the next frame
    let startup = resolve_phase(&mut state, &config, launch.y);
    assert_eq!(startup.phase, MovementPhase::GroundedJumpStartup);
    assert_eq!(startup.damping, 0.0);
    assert!(startup.gravity_enabled);
    assert!(state.in_jump_startup);

    state.ground = GroundHit::miss();
    let contact = classify_ground(&state.ground, config.max_slope_angle);
    state.is_grounded = contact.grounded;
    state.on_steep_slope = contact.steep;

    let airborne = resolve_phase(&mut state, &config, launch.y - 0.5);
    assert_eq!(airborne.phase, MovementPhase::Airborne);
    assert!(!state.in_jump_startup);
}
