//! Jump state machine: immediate jumps, the late-press buffer, and the
//! vertical-momentum cancellation baked into the impulse.
//!
//! Press edges are sampled per rendered frame and latched; the fixed tick
//! consumes the latch. Applying the impulse at frame rate would make jump
//! behavior frame-rate-dependent.
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use crate::core::components::Player;
use crate::core::config::config::GameConfig;
use crate::interaction::inputmap::types::InputMap;
use crate::player::grounding::{is_almost_grounded, is_grounded};
use crate::player::LocomotionState;

/// Jump press seen this frame, waiting for the next fixed tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PendingJump(pub bool);

/// Velocity change (m/s) for a jump from vertical velocity `vy`. The
/// `0.8 * vy` term cancels most pre-existing vertical momentum so jump height
/// stays consistent regardless of impact speed; the clamp keeps the impulse
/// from ever pointing down.
pub fn jump_velocity_change(jump_scale: f32, vy: f32) -> f32 {
    (2.0 * jump_scale - 0.8 * vy).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpDecision {
    /// Grounded press: impulse now.
    Impulse,
    /// Airborne, falling, about to land: remember the press.
    Buffer,
    /// Airborne and nowhere near the ground: press is dropped.
    Drop,
}

pub fn resolve_jump_press(grounded: bool, almost_grounded: bool, vy: f32) -> JumpDecision {
    if grounded {
        JumpDecision::Impulse
    } else if almost_grounded && vy < 0.0 {
        JumpDecision::Buffer
    } else {
        JumpDecision::Drop
    }
}

/// Per-frame edge detection (Update).
pub fn latch_jump_press(input: Res<InputMap>, mut pending: ResMut<PendingJump>) {
    if input.just_pressed("Jump") {
        pending.0 = true;
    }
}

/// Drops a latched press. Runs on freeze entry (pause, win) and on session
/// teardown; the resource outlives the session, so a press latched in the
/// freeze frame must not fire on the first running tick afterwards.
pub fn clear_pending_jump(mut pending: ResMut<PendingJump>) {
    pending.0 = false;
}

/// Fixed-tick consumption of the latched press (pre-physics).
pub fn resolve_pending_jump(
    mut pending: ResMut<PendingJump>,
    cfg: Res<GameConfig>,
    rapier: ReadRapierContext,
    mut q: Query<
        (
            Entity,
            &Transform,
            &Velocity,
            &ReadMassProperties,
            &mut ExternalImpulse,
            &mut LocomotionState,
        ),
        With<Player>,
    >,
) {
    if !pending.0 {
        return;
    }
    pending.0 = false;
    let Ok(ctx) = rapier.single() else {
        return;
    };
    let Ok((entity, tf, vel, mass, mut impulse, mut state)) = q.single_mut() else {
        return;
    };
    let p = &cfg.player;
    let grounded = is_grounded(
        &ctx,
        tf.translation,
        p.ball_radius + p.ground_probe_margin,
        entity,
    );
    let almost = is_almost_grounded(
        &ctx,
        tf.translation,
        p.ball_radius + p.almost_ground_margin,
        entity,
    );
    match resolve_jump_press(grounded, almost, vel.linvel.y) {
        JumpDecision::Impulse => {
            impulse.impulse.y += jump_velocity_change(p.jump_scale, vel.linvel.y) * mass.get().mass;
        }
        JumpDecision::Buffer => {
            state.jump_buffered = true;
        }
        JumpDecision::Drop => {}
    }
}

/// Ground-contact events consume the buffer: jump once if contact is
/// confirmed, otherwise just clear it. Runs post-physics so the tick's
/// contact events are in.
pub fn consume_ground_contacts(
    mut events: EventReader<CollisionEvent>,
    cfg: Res<GameConfig>,
    rapier: ReadRapierContext,
    mut q: Query<
        (
            Entity,
            &Transform,
            &Velocity,
            &ReadMassProperties,
            &mut ExternalImpulse,
            &mut LocomotionState,
        ),
        With<Player>,
    >,
) {
    let Ok((entity, tf, vel, mass, mut impulse, mut state)) = q.single_mut() else {
        return;
    };
    for ev in events.read() {
        let CollisionEvent::Started(a, b, flags) = ev else {
            continue;
        };
        if flags.contains(CollisionEventFlags::SENSOR) {
            continue;
        }
        if *a != entity && *b != entity {
            continue;
        }
        if !state.jump_buffered {
            continue;
        }
        state.jump_buffered = false;
        let Ok(ctx) = rapier.single() else {
            continue;
        };
        let p = &cfg.player;
        if is_grounded(
            &ctx,
            tf.translation,
            p.ball_radius + p.ground_probe_margin,
            entity,
        ) {
            impulse.impulse.y +=
                jump_velocity_change(p.jump_scale, vel.linvel.y) * mass.get().mass;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_jump_is_twice_scale() {
        assert_eq!(jump_velocity_change(2.0, 0.0), 4.0);
    }

    #[test]
    fn falling_momentum_is_cancelled() {
        // vy = -5: the cancellation adds 0.8*5 on top of the base impulse.
        assert_eq!(jump_velocity_change(2.0, -5.0), 8.0);
    }

    #[test]
    fn rising_fast_never_yields_downward_impulse() {
        assert_eq!(jump_velocity_change(2.0, 100.0), 0.0);
    }

    #[test]
    fn grounded_press_jumps_immediately() {
        assert_eq!(resolve_jump_press(true, true, 0.0), JumpDecision::Impulse);
        // Grounded bypasses buffering even while technically falling.
        assert_eq!(resolve_jump_press(true, true, -1.0), JumpDecision::Impulse);
    }

    #[test]
    fn late_press_buffers_only_while_falling() {
        assert_eq!(resolve_jump_press(false, true, -3.0), JumpDecision::Buffer);
        // Rising through the almost-ground band must not buffer.
        assert_eq!(resolve_jump_press(false, true, 3.0), JumpDecision::Drop);
    }

    #[test]
    fn high_airborne_press_is_dropped() {
        assert_eq!(resolve_jump_press(false, false, -9.0), JumpDecision::Drop);
    }
}
