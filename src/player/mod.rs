// This file is part of Ball Roller.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! The locomotion controller: grounding probes, movement integration, the
//! jump state machine, and the pause/resume coordinator.
pub mod grounding;
pub mod jump;
pub mod movement;
pub mod pause;

use bevy::prelude::*;

use crate::app::state::{AppState, GameplayState};
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};

pub use jump::PendingJump;
pub use pause::FrozenBody;

/// Mutable controller state carried by the player body. Grounded-ness is
/// derived fresh each tick from the probes, never stored here.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LocomotionState {
    /// Set when jump was pressed airborne just above the ground; consumed by
    /// the next grounding event (or cleared by a reset).
    pub jump_buffered: bool,
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingJump>()
            .add_systems(
                Update,
                (
                    pause::handle_pause_toggle.run_if(in_state(AppState::Playing)),
                    jump::latch_jump_press
                        .run_if(in_state(AppState::Playing))
                        .run_if(in_state(GameplayState::Running)),
                    pause::handle_manual_reset
                        .run_if(in_state(AppState::Playing))
                        .run_if(in_state(GameplayState::Running)),
                ),
            )
            .add_systems(
                FixedUpdate,
                (jump::resolve_pending_jump, movement::integrate_movement)
                    .chain()
                    .in_set(PrePhysicsSet)
                    .run_if(in_state(AppState::Playing))
                    .run_if(in_state(GameplayState::Running)),
            )
            .add_systems(
                FixedUpdate,
                (jump::consume_ground_contacts, pause::out_of_bounds_recovery)
                    .chain()
                    .in_set(PostPhysicsAdjustSet)
                    .run_if(in_state(AppState::Playing))
                    .run_if(in_state(GameplayState::Running)),
            )
            .add_systems(
                OnEnter(GameplayState::Paused),
                (pause::freeze_player, jump::clear_pending_jump),
            )
            .add_systems(OnExit(GameplayState::Paused), pause::thaw_player)
            .add_systems(
                OnEnter(GameplayState::Won),
                (pause::freeze_player, jump::clear_pending_jump),
            )
            .add_systems(OnExit(AppState::Playing), jump::clear_pending_jump);
    }
}
