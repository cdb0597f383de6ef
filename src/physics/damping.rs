use avian3d::prelude::*;
use bevy::prelude::*;

/// Linear damping coefficient owned by the movement controller.
///
/// Avian's own `LinearDamping` decays velocity implicitly; the controller's drag
/// compensation is tuned for the explicit `v * (1 - d * dt)` law applied here, so
/// controlled bodies keep Avian damping at zero and carry this instead.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut)]
pub struct SimulatedDamping(pub f32);

/// Applies one fixed step of damping to a velocity. Coefficients at or above the
/// step frequency stop the body outright instead of flipping its direction.
pub fn damped_velocity(velocity: Vec3, damping: f32, dt: f32) -> Vec3 {
    velocity * (1.0 - damping * dt).clamp(0.0, 1.0)
}

/// Decays controlled bodies' velocity after the physics step has integrated forces
pub fn apply_simulated_damping(
    mut query: Query<(&SimulatedDamping, &mut LinearVelocity)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.timestep().as_secs_f32();
    for (damping, mut velocity) in &mut query {
        if damping.0 > 0.0 {
            velocity.0 = damped_velocity(velocity.0, damping.0, dt);
        }
    }
}
