mod damping;
mod ground;
mod layers;
mod plugin;

pub use damping::*;
pub use ground::*;
pub use layers::GameLayer;
pub use plugin::PhysicsPlugin;
