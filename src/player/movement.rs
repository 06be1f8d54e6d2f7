//! Movement integrator: camera-relative drive force with a soft speed cap,
//! plus the explicit gravity term. Runs once per fixed tick while the session
//! is running; never while frozen.
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::components::Player;
use crate::core::config::config::{GameConfig, PlayerConfig};
use crate::interaction::inputmap::types::InputMap;
use crate::rendering::camera::OrbitRig;

/// Project onto the horizontal plane and renormalize; `Vec3::ZERO` when the
/// input is (nearly) vertical.
pub fn flatten_to_plane(v: Vec3) -> Vec3 {
    let flat = Vec3::new(v.x, 0.0, v.z);
    if flat.length_squared() < 1e-6 {
        Vec3::ZERO
    } else {
        flat.normalize()
    }
}

/// Thrust scale in [0,1]: fades to zero as velocity along the desired
/// direction approaches `max_speed`. A soft cap, not a hard clamp — the term
/// never turns negative, so it cannot brake past the cap on its own.
pub fn control_acceleration(velocity: Vec3, desired_dir: Vec3, max_speed: f32) -> f32 {
    if desired_dir.length_squared() < 1e-6 {
        return 0.0;
    }
    let along = velocity.dot(desired_dir.normalize());
    ((max_speed - along) / max_speed).clamp(0.0, 1.0)
}

/// The per-tick drive force for a pair of input axes and a camera basis.
pub fn drive_force(
    axes: Vec2,
    cam_forward: Vec3,
    cam_right: Vec3,
    velocity: Vec3,
    cfg: &PlayerConfig,
) -> Vec3 {
    let forward = flatten_to_plane(cam_forward);
    let right = flatten_to_plane(cam_right);
    let desired = forward * axes.y + right * axes.x;
    if desired.length_squared() < 1e-6 {
        return Vec3::ZERO;
    }
    desired * cfg.speed * control_acceleration(velocity, desired, cfg.max_speed)
}

/// Writes (overwrites, never accumulates) the body's external force each
/// fixed tick: drive force + explicit gravity. Engine gravity is zeroed in
/// the physics setup, so this is the only gravity source.
pub fn integrate_movement(
    cfg: Res<GameConfig>,
    input: Res<InputMap>,
    rig: Res<OrbitRig>,
    mut q: Query<(&Velocity, &ReadMassProperties, &mut ExternalForce), With<Player>>,
) {
    let Ok((vel, mass, mut force)) = q.single_mut() else {
        return;
    };
    let axes = input.axis2("Move");
    let drive = drive_force(axes, rig.forward(), rig.right(), vel.linvel, &cfg.player);
    let gravity = Vec3::NEG_Y * cfg.player.gravity_scale * mass.get().mass;
    force.force = drive + gravity;
    force.torque = Vec3::ZERO;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_full_at_rest() {
        let c = control_acceleration(Vec3::ZERO, Vec3::X, 10.0);
        assert!((c - 1.0).abs() < 1e-6);
    }

    #[test]
    fn control_fades_toward_cap() {
        let half = control_acceleration(Vec3::X * 5.0, Vec3::X, 10.0);
        assert!((half - 0.5).abs() < 1e-6);
        let at_cap = control_acceleration(Vec3::X * 10.0, Vec3::X, 10.0);
        assert!(at_cap.abs() < 1e-6);
    }

    #[test]
    fn control_never_negative_past_cap() {
        let over = control_acceleration(Vec3::X * 25.0, Vec3::X, 10.0);
        assert_eq!(over, 0.0);
    }

    #[test]
    fn reverse_input_gets_full_thrust() {
        // Moving +X, steering -X: velocity along desired is negative, so the
        // clamp caps the factor at 1 rather than boosting it.
        let c = control_acceleration(Vec3::X * 8.0, Vec3::NEG_X, 10.0);
        assert_eq!(c, 1.0);
    }

    #[test]
    fn drive_is_camera_relative_and_flattened() {
        let cfg = PlayerConfig::default();
        // Camera pitched down: forward has a -Y component that must be ignored.
        let cam_forward = Vec3::new(0.0, -0.5, -1.0);
        let cam_right = Vec3::X;
        let f = drive_force(Vec2::new(0.0, 1.0), cam_forward, cam_right, Vec3::ZERO, &cfg);
        assert_eq!(f.y, 0.0);
        assert!(f.z < 0.0, "forward input should push along -Z, got {f}");
        assert!((f.length() - cfg.speed).abs() < 1e-4);
    }

    #[test]
    fn no_input_no_drive() {
        let cfg = PlayerConfig::default();
        let f = drive_force(Vec2::ZERO, Vec3::NEG_Z, Vec3::X, Vec3::new(3.0, 0.0, 0.0), &cfg);
        assert_eq!(f, Vec3::ZERO);
    }

    #[test]
    fn vertical_camera_basis_degenerates_safely() {
        let cfg = PlayerConfig::default();
        let f = drive_force(Vec2::new(0.0, 1.0), Vec3::NEG_Y, Vec3::X, Vec3::ZERO, &cfg);
        assert_eq!(f.y, 0.0);
    }
}
