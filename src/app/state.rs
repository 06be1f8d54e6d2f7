use bevy::prelude::*;

/// High-level app lifecycle state.
/// MainMenu -> Playing (level spawned on enter, torn down on exit for restarts)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Title screen; waits for a confirm press.
    #[default]
    MainMenu,
    /// Active play session.
    Playing,
}

/// Play-session sub-state. Only meaningful while `AppState::Playing`.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameplayState {
    #[default]
    Running,
    /// Body frozen, kinetic snapshot held; resumable via the pause toggle.
    Paused,
    /// Body frozen exactly like Paused, but the pause toggle does not leave
    /// this state; only a restart does.
    Won,
}
