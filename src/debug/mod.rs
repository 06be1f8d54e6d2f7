//! Interval-throttled simulation logging, compiled in via the `debug` feature.
#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy_rapier3d::prelude::Velocity;

#[cfg(feature = "debug")]
use crate::app::state::GameplayState;
#[cfg(feature = "debug")]
use crate::core::components::{PickupCount, Player};
#[cfg(feature = "debug")]
use crate::player::LocomotionState;

pub struct DebugPlugin;

#[cfg(feature = "debug")]
#[derive(Resource)]
pub struct DebugState {
    pub time_accum: f32,
    pub log_interval: f32,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            time_accum: 0.0,
            log_interval: 2.0,
        }
    }
}

#[cfg(feature = "debug")]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, debug_logging_system);
    }
}

#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}

#[cfg(feature = "debug")]
fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    play_state: Res<State<GameplayState>>,
    count: Option<Res<PickupCount>>,
    q: Query<(&Transform, &Velocity, &LocomotionState), With<Player>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    let Ok((tf, vel, loco)) = q.single() else {
        return;
    };
    info!(
        "SIM t={:.3}s state={:?} pos=({:.1},{:.1},{:.1}) |v|={:.2} vy={:.2} buffered={} pickups={}",
        time.elapsed_secs(),
        play_state.get(),
        tf.translation.x,
        tf.translation.y,
        tf.translation.z,
        vel.linvel.length(),
        vel.linvel.y,
        loco.jump_buffered,
        count.map(|c| c.0).unwrap_or(0),
    );
}
