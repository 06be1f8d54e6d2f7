//! In-game HUD: pickup counter, speed readout, pause overlay, win banner.
//! Driven only by one-way notifications and state transitions; never feeds
//! anything back into the controller.
use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};
use bevy_rapier3d::prelude::Velocity;

use crate::app::state::{AppState, GameplayState};
use crate::core::components::Player;
use crate::gameplay::events::PickupCollected;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_hud)
            .add_systems(OnExit(AppState::Playing), despawn_hud)
            .add_systems(
                Update,
                (update_count_text, update_speed_text).run_if(in_state(AppState::Playing)),
            )
            .add_systems(OnEnter(GameplayState::Paused), show_pause_overlay)
            .add_systems(OnExit(GameplayState::Paused), hide_pause_overlay)
            .add_systems(OnEnter(GameplayState::Won), show_win_banner);
    }
}

#[derive(Component)]
struct HudRoot;
#[derive(Component)]
struct CountText;
#[derive(Component)]
struct SpeedText;
#[derive(Component)]
struct BannerText;

fn spawn_hud(mut commands: Commands) {
    let root = commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexStart,
                align_items: AlignItems::FlexStart,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(4.0),
                ..default()
            },
        ))
        .id();
    commands.entity(root).with_children(|p| {
        p.spawn((CountText, Text::new("Count: 0")));
        p.spawn((SpeedText, Text::new("Speed: 0.0")));
        p.spawn((BannerText, Text::new("")));
    });
}

fn despawn_hud(mut commands: Commands, q_root: Query<Entity, With<HudRoot>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}

fn update_count_text(
    mut events: EventReader<PickupCollected>,
    mut q_text: Query<&mut Text, With<CountText>>,
) {
    let Some(last) = events.read().last() else {
        return;
    };
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    *text = Text::new(format!("Count: {}", last.count));
}

fn update_speed_text(
    q_player: Query<&Velocity, With<Player>>,
    mut q_text: Query<&mut Text, With<SpeedText>>,
) {
    let Ok(vel) = q_player.single() else {
        return;
    };
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    let s = format!("Speed: {:.1}", vel.linvel.length());
    if text.as_str() != s {
        *text = Text::new(s);
    }
}

fn show_pause_overlay(mut q_text: Query<&mut Text, With<BannerText>>) {
    if let Ok(mut text) = q_text.single_mut() {
        *text = Text::new("PAUSED");
    }
}

fn hide_pause_overlay(mut q_text: Query<&mut Text, With<BannerText>>) {
    if let Ok(mut text) = q_text.single_mut() {
        *text = Text::new("");
    }
}

fn show_win_banner(mut q_text: Query<&mut Text, With<BannerText>>) {
    if let Ok(mut text) = q_text.single_mut() {
        *text = Text::new("You win! Press Enter to play again");
    }
}
