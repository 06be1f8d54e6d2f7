// This file is part of Ball Roller.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use bevy_rapier3d::plugin::PhysicsSet;

use crate::app::menu::MenuPlugin;
use crate::app::state::{AppState, GameplayState};
use crate::core::system::system_order::{PostPhysicsAdjustSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::gameplay::events::NotificationPlugin;
use crate::gameplay::level::LevelPlugin;
use crate::gameplay::pickups::PickupPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::physics::rapier::PhysicsSetupPlugin;
use crate::player::PlayerPlugin;
use crate::rendering::camera::OrbitCameraPlugin;
use crate::rendering::hud::HudPlugin;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_state::<GameplayState>()
            .configure_sets(
                FixedUpdate,
                (
                    // Bracket the rapier step: forces in, corrections out.
                    PrePhysicsSet.before(PhysicsSet::SyncBackend),
                    PostPhysicsAdjustSet
                        .after(PrePhysicsSet)
                        .after(PhysicsSet::Writeback),
                ),
            )
            .add_plugins((
                InputActionsPlugin,
                PhysicsSetupPlugin,
                NotificationPlugin,
                MenuPlugin,
                LevelPlugin,
                PlayerPlugin,
                PickupPlugin,
                OrbitCameraPlugin,
                HudPlugin,
                DebugPlugin,
            ));
    }
}
