//! Pause/resume coordinator: the freeze transaction owns the only legal way
//! to stop and restart the body. Out-of-bounds recovery and the win freeze
//! funnel through the same transitions.
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::app::state::GameplayState;
use crate::core::components::{Player, RecoveryPoint};
use crate::core::config::config::GameConfig;
use crate::gameplay::events::{OutOfBounds, PauseChanged};
use crate::interaction::inputmap::types::InputMap;
use crate::player::LocomotionState;
use crate::rendering::camera::OrbitRig;

/// Kinetic snapshot taken at freeze entry. Present only while the body is
/// frozen; consumed exactly once at thaw.
#[derive(Component, Debug, Clone, Copy)]
pub struct FrozenBody {
    pub linvel: Vec3,
    pub angvel: Vec3,
}

/// Pause toggle edge, sampled per frame. Won is terminal for this input.
pub fn handle_pause_toggle(
    input: Res<InputMap>,
    state: Res<State<GameplayState>>,
    mut next: ResMut<NextState<GameplayState>>,
    mut notify: EventWriter<PauseChanged>,
) {
    if !input.just_pressed("PauseToggle") {
        return;
    }
    match state.get() {
        GameplayState::Running => {
            next.set(GameplayState::Paused);
            notify.write(PauseChanged { paused: true });
        }
        GameplayState::Paused => {
            next.set(GameplayState::Running);
            notify.write(PauseChanged { paused: false });
        }
        GameplayState::Won => {}
    }
}

/// Freeze transaction: single atomic snapshot, then full motion lock. A
/// second freeze while already frozen is a no-op (the snapshot is kept).
pub fn freeze_player(
    mut commands: Commands,
    mut q: Query<(Entity, &mut Velocity, &mut ExternalForce, Option<&FrozenBody>), With<Player>>,
) {
    let Ok((entity, mut vel, mut force, frozen)) = q.single_mut() else {
        return;
    };
    if frozen.is_some() {
        return;
    }
    let snapshot = FrozenBody {
        linvel: vel.linvel,
        angvel: vel.angvel,
    };
    vel.linvel = Vec3::ZERO;
    vel.angvel = Vec3::ZERO;
    force.force = Vec3::ZERO;
    force.torque = Vec3::ZERO;
    commands.entity(entity).insert((
        snapshot,
        LockedAxes::TRANSLATION_LOCKED | LockedAxes::ROTATION_LOCKED,
    ));
}

/// Thaw transaction: unlock, restore the captured pair verbatim, drop the
/// snapshot. Motion resumes exactly where it left off.
pub fn thaw_player(
    mut commands: Commands,
    mut q: Query<(Entity, &mut Velocity, &FrozenBody), With<Player>>,
) {
    let Ok((entity, mut vel, frozen)) = q.single_mut() else {
        return;
    };
    vel.linvel = frozen.linvel;
    vel.angvel = frozen.angvel;
    commands
        .entity(entity)
        .remove::<(FrozenBody, LockedAxes)>();
}

/// Re-teleport to the recovery point with a full kinetic reset. Clears the
/// jump buffer and accumulated camera look state.
pub fn recover_body(
    tf: &mut Transform,
    vel: &mut Velocity,
    state: &mut LocomotionState,
    rig: &mut OrbitRig,
    recovery: Vec3,
) {
    tf.translation = recovery;
    vel.linvel = Vec3::ZERO;
    vel.angvel = Vec3::ZERO;
    state.jump_buffered = false;
    rig.reset_look();
}

/// Fixed-tick out-of-bounds check (post-physics).
pub fn out_of_bounds_recovery(
    cfg: Res<GameConfig>,
    recovery: Res<RecoveryPoint>,
    mut rig: ResMut<OrbitRig>,
    mut notify: EventWriter<OutOfBounds>,
    mut q: Query<(&mut Transform, &mut Velocity, &mut LocomotionState), With<Player>>,
) {
    let Ok((mut tf, mut vel, mut state)) = q.single_mut() else {
        return;
    };
    if tf.translation.y > cfg.player.kill_y {
        return;
    }
    info!(target: "player", "out of bounds at y={:.2}; recovering", tf.translation.y);
    recover_body(&mut tf, &mut vel, &mut state, &mut rig, recovery.0);
    notify.write(OutOfBounds);
}

/// Manual reset shares the out-of-bounds recovery path.
pub fn handle_manual_reset(
    input: Res<InputMap>,
    recovery: Res<RecoveryPoint>,
    mut rig: ResMut<OrbitRig>,
    mut notify: EventWriter<OutOfBounds>,
    mut q: Query<(&mut Transform, &mut Velocity, &mut LocomotionState), With<Player>>,
) {
    if !input.just_pressed("Reset") {
        return;
    }
    let Ok((mut tf, mut vel, mut state)) = q.single_mut() else {
        return;
    };
    recover_body(&mut tf, &mut vel, &mut state, &mut rig, recovery.0);
    notify.write(OutOfBounds);
}
