use bevy::prelude::*;

use crate::physics::GroundHit;

/// Marker component for the controlled body (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Entity whose yaw defines "forward" for movement input
#[derive(Component, Debug, Clone, Copy, Deref)]
pub struct FacingReference(pub Entity);

/// Per-body movement state, written only by the controller's systems
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct MovementState {
    /// Latest raw move input, passed through unclamped
    pub move_input: Vec2,
    pub sprint_held: bool,
    /// World-space horizontal move intent, rebuilt every frame
    pub move_direction: Vec3,
    /// Latest ground probe, reused by every fixed step until the next frame
    pub ground: GroundHit,
    pub is_grounded: bool,
    pub on_steep_slope: bool,
    pub in_jump_startup: bool,
    /// Speed the body is currently allowed to move at. Zero until first grounded.
    pub effective_speed: f32,
    pub gravity_enabled: bool,
    /// Phase resolved on the last frame, `None` before the first one
    pub phase: Option<MovementPhase>,
}

/// Damping/gravity regime, recomputed every frame from the grounded and jump flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPhase {
    /// Standing on walkable ground
    GroundedStable,
    /// Still touching ground right after a jump impulse
    GroundedJumpStartup,
    Airborne,
}

impl MovementPhase {
    pub fn from_flags(is_grounded: bool, in_jump_startup: bool) -> Self {
        match (is_grounded, in_jump_startup) {
            (true, false) => Self::GroundedStable,
            (true, true) => Self::GroundedJumpStartup,
            (false, _) => Self::Airborne,
        }
    }
}
