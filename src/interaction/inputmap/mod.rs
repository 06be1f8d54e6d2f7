//! Named input actions decoupling gameplay systems from raw device polling.
//! Declarations live in `assets/config/input.toml`.
pub mod parse;
pub mod plugin;
pub mod systems;
pub mod types;
