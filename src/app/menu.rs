use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::{AppState, GameplayState};
use crate::interaction::inputmap::types::InputMap;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::MainMenu), (show_menu_instructions, spawn_menu_ui))
            .add_systems(Update, handle_menu_input.run_if(in_state(AppState::MainMenu)))
            .add_systems(
                Update,
                handle_won_restart
                    .run_if(in_state(AppState::Playing))
                    .run_if(in_state(GameplayState::Won)),
            )
            .add_systems(OnExit(AppState::MainMenu), despawn_menu_ui);
    }
}

fn show_menu_instructions() {
    info!(target: "menu", "=== BALL ROLLER ===");
    info!(target: "menu", "WASD roll, mouse orbits the camera, Space jumps.");
    info!(target: "menu", "Collect every pickup to win. Press Enter to start.");
}

fn handle_menu_input(
    input: Res<InputMap>,
    mut next_app: ResMut<NextState<AppState>>,
    mut next_play: ResMut<NextState<GameplayState>>,
) {
    if input.just_pressed("Confirm") {
        info!(target: "menu", "Starting session");
        next_play.set(GameplayState::Running);
        next_app.set(AppState::Playing);
    }
}

/// After a win the session is frozen; confirm (or reset) returns to the menu
/// so a fresh session can start. The pause toggle deliberately does nothing
/// in this state.
fn handle_won_restart(input: Res<InputMap>, mut next_app: ResMut<NextState<AppState>>) {
    if input.just_pressed("Confirm") || input.just_pressed("Reset") {
        info!(target: "menu", "Session over; returning to menu");
        next_app.set(AppState::MainMenu);
    }
}

// === UI IMPLEMENTATION ===

#[derive(Component)]
struct MenuUiRoot;

fn spawn_menu_ui(mut commands: Commands) {
    let root = commands
        .spawn((
            MenuUiRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.85)),
        ))
        .id();

    commands.entity(root).with_children(|p| {
        p.spawn(Text::new("BALL ROLLER"));
        p.spawn(Text::new(
            "WASD: roll   Mouse: camera   Space: jump   Esc: pause   R: reset",
        ));
        p.spawn(Text::new("Press Enter to start"));
    });
}

fn despawn_menu_ui(mut commands: Commands, q_root: Query<Entity, With<MenuUiRoot>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}
