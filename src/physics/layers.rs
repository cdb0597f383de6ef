use avian3d::prelude::*;

/// Collision layers for the physics simulation
#[derive(PhysicsLayer, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Controlled bodies
    Player,
    /// Static world geometry, the only layer the ground probe hits
    World,
}
