use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::config::config::GameConfig;

/// Wrapper configuring Rapier for the locomotion controller: fixed-schedule
/// stepping and zeroed global gravity (the movement integrator applies its
/// own explicit gravity term).
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .add_systems(Startup, configure_physics);
        if app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.rapier_debug)
            .unwrap_or(false)
        {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

fn configure_physics(mut rapier_cfg: Query<&mut RapierConfiguration>) {
    for mut cfg in &mut rapier_cfg {
        cfg.gravity = Vect::ZERO;
    }
}
