use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_rigid_movement::prelude::*;

const CONFIG_PATH: &str = "assets/movement.ron";

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rigid Body Movement".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RigidMovementPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, follow_player)
        .run();
}

fn load_config() -> MovementConfig {
    let source = match std::fs::read_to_string(CONFIG_PATH) {
        Ok(source) => source,
        Err(err) => {
            warn!("could not read {CONFIG_PATH} ({err}), using default movement config");
            return MovementConfig::default();
        }
    };

    match MovementConfig::from_ron_str(&source) {
        Ok(config) => {
            info!("loaded movement config from {CONFIG_PATH}");
            config
        }
        Err(err) => {
            warn!("{CONFIG_PATH}: {err}, using default movement config");
            MovementConfig::default()
        }
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = load_config();
    let shape = BodyShape::default();

    // The facing reference carries the camera; whatever turns it steers movement
    let facing = commands
        .spawn((
            Transform::from_xyz(0.0, 3.0, 0.0),
            Visibility::default(),
        ))
        .id();
    let camera = commands
        .spawn((
            Camera3d::default(),
            Transform::from_xyz(0.0, 0.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();
    commands.entity(facing).add_child(camera);

    spawn_player(&mut commands, config, shape, Vec3::new(0.0, 2.0, 0.0), facing);

    let ground_material = materials.add(Color::srgb(0.35, 0.4, 0.35));
    let ramp_material = materials.add(Color::srgb(0.55, 0.45, 0.3));

    // Floor
    commands.spawn((
        RigidBody::Static,
        Collider::cuboid(60.0, 1.0, 60.0),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
        Mesh3d(meshes.add(Cuboid::new(60.0, 1.0, 60.0))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, -0.5, 0.0),
    ));

    // A walkable ramp and one too steep to climb
    for (angle, x) in [(25.0_f32, -8.0), (60.0_f32, 8.0)] {
        commands.spawn((
            RigidBody::Static,
            Collider::cuboid(4.0, 0.5, 12.0),
            CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
            Mesh3d(meshes.add(Cuboid::new(4.0, 0.5, 12.0))),
            MeshMaterial3d(ramp_material.clone()),
            Transform::from_xyz(x, 2.0, -10.0)
                .with_rotation(Quat::from_rotation_x(angle.to_radians())),
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Keeps the facing rig (and its camera) on the player body
fn follow_player(
    player_query: Query<(&Transform, &FacingReference), With<Player>>,
    mut rig_query: Query<&mut Transform, Without<Player>>,
) {
    for (player_transform, facing) in &player_query {
        if let Ok(mut rig_transform) = rig_query.get_mut(facing.0) {
            rig_transform.translation = player_transform.translation;
        }
    }
}
