use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
use thiserror::Error;

use super::config::*;
use super::forces::*;
use super::input::{
    JumpAction, MoveAction, SprintAction, handle_jump_pressed, handle_move_end,
    handle_move_input, handle_sprint_end, handle_sprint_start,
};
use super::movement::*;
use super::phase::update_movement_phase;
use super::state::*;
use crate::physics::{GameLayer, SimulatedDamping};

/// Collaborators a controlled body cannot run without
#[derive(Debug, Error)]
pub enum MovementSetupError {
    #[error("{body} faces along {facing}, which has no transform")]
    MissingFacing { body: Entity, facing: Entity },
    #[error("{body} has an invalid movement config: {source}")]
    InvalidConfig {
        body: Entity,
        #[source]
        source: ConfigError,
    },
}

/// Plugin for the force-driven movement controller
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EnhancedInputPlugin>() {
            app.add_plugins(EnhancedInputPlugin);
        }

        // Register input context for player
        app.add_input_context::<Player>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_sprint_start);
        app.add_observer(handle_sprint_end);
        app.add_observer(handle_jump_pressed);

        // Frame systems: facing, ground probe, damping regime. They run after input
        // handling so a jump pressed this frame already drops damping for the fixed steps.
        app.add_systems(
            RunFixedMainLoop,
            (
                resolve_new_bodies,
                convert_move_input,
                update_ground_state,
                update_movement_phase,
            )
                .chain()
                .in_set(RunFixedMainLoopSystems::BeforeFixedMainLoop),
        );

        // Fixed update systems for physics
        app.add_systems(FixedUpdate, apply_step_forces);
    }
}

/// Fails fast on bodies spawned without a usable facing reference or config
pub fn resolve_new_bodies(
    bodies: Query<(Entity, &FacingReference, &MovementConfig), Added<MovementState>>,
    transforms: Query<(), With<GlobalTransform>>,
) -> Result {
    for (body, facing, config) in &bodies {
        config
            .validate()
            .map_err(|source| MovementSetupError::InvalidConfig { body, source })?;

        if !transforms.contains(facing.0) {
            return Err(MovementSetupError::MissingFacing {
                body,
                facing: facing.0,
            }
            .into());
        }

        info!("movement controller ready on {body}");
    }
    Ok(())
}

/// Spawns a controlled body at `position`, moving relative to `facing`'s yaw.
/// The facing entity is owned by the caller (usually a camera rig).
pub fn spawn_player(
    commands: &mut Commands,
    config: MovementConfig,
    shape: BodyShape,
    position: Vec3,
    facing: Entity,
) -> Entity {
    commands
        .spawn((
            Player,
            config,
            shape,
            MovementState::default(),
            FacingReference(facing),
            SimulatedDamping::default(),
        ))
        .insert((
            // Physics - Dynamic body with locked rotation, let Avian handle collisions
            RigidBody::Dynamic,
            Collider::capsule(shape.radius, shape.segment_length()),
            CollisionLayers::new(GameLayer::Player, [GameLayer::World, GameLayer::Default]),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0),  // Damping does the braking
            Restitution::new(0.0),  // No bounce
            GravityScale(1.0),
        ))
        .insert((
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
                (
                    Action::<SprintAction>::new(),
                    bindings![KeyCode::ShiftLeft, GamepadButton::LeftTrigger],
                ),
            ]),
        )
        .id()
}
