pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod player;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::GamePlugin;
pub use crate::app::state::{AppState, GameplayState};
pub use crate::core::components::{Pickup, Player};
pub use crate::core::config::config::{GameConfig, PlayerConfig, WindowConfig};
