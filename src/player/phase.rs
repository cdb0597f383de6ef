use avian3d::prelude::*;
use bevy::prelude::*;

use super::config::MovementConfig;
use super::state::*;
use crate::physics::SimulatedDamping;

/// Damping and gravity the body should run with this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseOutcome {
    pub phase: MovementPhase,
    pub damping: f32,
    pub gravity_enabled: bool,
}

/// Resolves the current phase and applies its side effects on the state.
///
/// Airborne frames always clear `in_jump_startup`, even the frame right after the
/// impulse if the probe still misses the ground by then.
pub fn resolve_phase(
    state: &mut MovementState,
    config: &MovementConfig,
    vertical_velocity: f32,
) -> PhaseOutcome {
    let phase = MovementPhase::from_flags(state.is_grounded, state.in_jump_startup);
    let below_terminal = vertical_velocity > -config.terminal_velocity;

    let (damping, gravity_enabled) = match phase {
        MovementPhase::GroundedStable => (config.grounded_linear_damping, state.on_steep_slope),
        MovementPhase::GroundedJumpStartup => (0.0, below_terminal),
        MovementPhase::Airborne => {
            state.in_jump_startup = false;
            (0.0, below_terminal)
        }
    };

    state.gravity_enabled = gravity_enabled;
    PhaseOutcome {
        phase,
        damping,
        gravity_enabled,
    }
}

/// Writes damping and the gravity flag for the frame onto each controlled body
pub fn update_movement_phase(
    mut query: Query<(
        Entity,
        &MovementConfig,
        &LinearVelocity,
        &mut MovementState,
        &mut SimulatedDamping,
        &mut GravityScale,
    )>,
) {
    for (entity, config, velocity, mut state, mut damping, mut gravity_scale) in &mut query {
        let outcome = resolve_phase(&mut state, config, velocity.y);

        if state.phase.replace(outcome.phase) != Some(outcome.phase) {
            debug!("{entity} entered {:?}", outcome.phase);
        }

        damping.0 = outcome.damping;
        gravity_scale.0 = if outcome.gravity_enabled { 1.0 } else { 0.0 };
    }
}
