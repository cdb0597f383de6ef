mod config;
mod forces;
pub mod input;
mod jump;
mod movement;
mod phase;
mod plugin;
mod state;

pub use config::*;
pub use forces::*;
pub use input::{JumpAction, MoveAction, SprintAction};
pub use jump::*;
pub use movement::*;
pub use phase::*;
pub use plugin::{MovementSetupError, PlayerPlugin, resolve_new_bodies, spawn_player};
pub use state::*;
