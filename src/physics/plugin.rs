use avian3d::prelude::*;
use bevy::prelude::*;

use super::damping::apply_simulated_damping;

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Plugin that sets up the Avian3D physics engine and the controller's damping integrator
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            PhysicsPlugins::default()
                .with_length_unit(1.0), // 1 unit = 1 meter
        );

        app.insert_resource(Gravity(Vec3::NEG_Y * STANDARD_GRAVITY));

        // Avian steps in FixedPostUpdate, so this sees velocities after force integration
        app.add_systems(FixedLast, apply_simulated_damping);
    }
}
