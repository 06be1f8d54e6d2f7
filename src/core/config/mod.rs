pub mod config;

pub use config::{CameraConfig, GameConfig, LevelConfig, PlayerConfig, WindowConfig};
