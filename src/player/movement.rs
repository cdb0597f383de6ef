use avian3d::prelude::*;
use bevy::prelude::*;

use super::config::{BodyShape, MovementConfig};
use super::state::*;
use crate::physics::{GameLayer, GroundProbe, classify_ground, probe_ground};

/// Yaw of a rotation about world up, in radians
pub fn yaw_of(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::YXZ).0
}

/// Maps 2D input onto the horizontal plane relative to a facing yaw.
/// +Y input is forward (-Z), +X input is right (+X).
pub fn move_direction(input: Vec2, yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::new(input.x, 0.0, -input.y)
}

/// Rebuilds each body's move direction from its input and facing reference
pub fn convert_move_input(
    mut query: Query<(&FacingReference, &mut MovementState)>,
    facing_query: Query<&GlobalTransform>,
) {
    for (facing, mut state) in &mut query {
        let Ok(facing_transform) = facing_query.get(facing.0) else {
            continue;
        };
        let (_, rotation, _) = facing_transform.to_scale_rotation_translation();
        state.move_direction = move_direction(state.move_input, yaw_of(rotation));
    }
}

/// Probes the ground under each body and refreshes its grounded/steep flags.
/// Reads the physics `Position`, not the interpolated `Transform`.
pub fn update_ground_state(
    spatial_query: SpatialQuery,
    mut query: Query<(Entity, &Position, &BodyShape, &MovementConfig, &mut MovementState)>,
) {
    for (entity, position, shape, config, mut state) in &mut query {
        let probe = GroundProbe::for_body(shape.radius, config.grounded_distance);
        let filter = SpatialQueryFilter::default()
            .with_mask(GameLayer::World)
            .with_excluded_entities([entity]);

        let hit = probe_ground(&spatial_query, &probe, shape.base(position.0), &filter);
        let contact = classify_ground(&hit, config.max_slope_angle);

        state.ground = hit;
        state.is_grounded = contact.grounded;
        state.on_steep_slope = contact.steep;
    }
}
