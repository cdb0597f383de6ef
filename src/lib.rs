pub mod physics;
pub mod player;

pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;

use bevy::prelude::*;

/// Unified plugin that adds physics and the movement controller.
pub struct RigidMovementPlugin;

impl Plugin for RigidMovementPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<PhysicsPlugin>() {
            app.add_plugins(PhysicsPlugin);
        }
        if !app.is_plugin_added::<PlayerPlugin>() {
            app.add_plugins(PlayerPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::physics::{GameLayer, GroundHit, PhysicsPlugin, SimulatedDamping};
    pub use crate::player::{
        BodyShape, ConfigError, FacingReference, MovementConfig, MovementPhase,
        MovementSetupError, MovementState, Player, PlayerPlugin, spawn_player,
    };
    pub use crate::RigidMovementPlugin;
}
