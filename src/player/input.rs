use avian3d::prelude::*;
use bevy::ecs::observer::On;
use bevy::prelude::{EntityEvent, Query, Res, Vec2, debug};
use bevy_enhanced_input::prelude::*;

use super::config::MovementConfig;
use super::jump::launch_body;
use super::state::MovementState;

/// Move in a direction (WASD)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Sprint action (hold)
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct SprintAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// Stores the latest move axis, unclamped
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut MovementState>) {
    if let Ok(mut state) = query.get_mut(trigger.event_target()) {
        state.move_input = trigger.value;
    }
}

/// Clear move input when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut MovementState>) {
    if let Ok(mut state) = query.get_mut(trigger.event_target()) {
        state.move_input = Vec2::ZERO;
    }
}

/// Handle sprint start
pub fn handle_sprint_start(trigger: On<Start<SprintAction>>, mut query: Query<&mut MovementState>) {
    if let Ok(mut state) = query.get_mut(trigger.event_target()) {
        state.sprint_held = true;
    }
}

/// Handle sprint end
pub fn handle_sprint_end(trigger: On<Complete<SprintAction>>, mut query: Query<&mut MovementState>) {
    if let Ok(mut state) = query.get_mut(trigger.event_target()) {
        state.sprint_held = false;
    }
}

/// Jumps on press, immediately, if the body is grounded
pub fn handle_jump_pressed(
    trigger: On<Start<JumpAction>>,
    mut query: Query<(&MovementConfig, &mut MovementState, &mut LinearVelocity)>,
    gravity: Res<Gravity>,
) {
    let entity = trigger.event_target();
    let Ok((config, mut state, mut velocity)) = query.get_mut(entity) else {
        return;
    };

    if launch_body(&mut state, config, &mut velocity, gravity.0.length()) {
        debug!("{entity} jumped, vertical velocity now {:.2}", velocity.y);
    }
}
