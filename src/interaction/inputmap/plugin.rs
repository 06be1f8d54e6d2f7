use bevy::prelude::*;

use super::parse::parse_input_toml;
use super::systems::system_collect_inputs;
use super::types::InputMap;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputActionUpdateSet;

/// Bindings compiled in as a fallback when the config file is absent
/// (tests, packaged builds without an assets directory).
pub const DEFAULT_INPUT_TOML: &str = include_str!("../../../assets/config/input.toml");

pub struct InputActionsPlugin;

impl Plugin for InputActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputMap>()
            .configure_sets(PreUpdate, InputActionUpdateSet)
            .add_systems(PreStartup, load_initial_input_map)
            .add_systems(
                PreUpdate,
                system_collect_inputs.in_set(InputActionUpdateSet),
            );
    }
}

fn load_initial_input_map(mut commands: Commands) {
    let path = std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| "assets/config/input.toml".into());
    let raw = std::fs::read_to_string(&path).unwrap_or_else(|_| DEFAULT_INPUT_TOML.to_string());
    let parsed = parse_input_toml(&raw);
    if !parsed.errors.is_empty() {
        for e in parsed.errors {
            error!("INPUT MAP ERROR: {e}");
        }
    } else {
        info!("Input map loaded: {} actions", parsed.input_map.actions.len());
    }
    commands.insert_resource(parsed.input_map);
}
