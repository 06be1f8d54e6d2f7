//! Orbit camera rig. Owns the accumulated look state and exposes the basis
//! vectors the movement integrator consumes.
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::app::state::{AppState, GameplayState};
use crate::core::components::Player;
use crate::core::config::config::GameConfig;
use crate::interaction::inputmap::types::InputMap;

#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitRig {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    initial_pitch: f32,
}

impl OrbitRig {
    pub fn from_config(cfg: &GameConfig) -> Self {
        let pitch = cfg.camera.initial_pitch_deg.to_radians();
        Self {
            yaw: 0.0,
            pitch,
            distance: cfg.camera.distance,
            initial_pitch: pitch,
        }
    }

    pub fn rotate(&mut self, delta: Vec2, cfg: &GameConfig) {
        let s = cfg.camera.sensitivity * 0.01;
        self.yaw -= delta.x * s;
        self.pitch = (self.pitch + delta.y * s).clamp(
            cfg.camera.pitch_min_deg.to_radians(),
            cfg.camera.pitch_max_deg.to_radians(),
        );
    }

    /// Drop accumulated look state (out-of-bounds reset).
    pub fn reset_look(&mut self) {
        self.yaw = 0.0;
        self.pitch = self.initial_pitch;
    }

    fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0)
    }

    /// World-space view direction (pitch included; the integrator flattens it).
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    rotate_rig
                        .run_if(in_state(AppState::Playing))
                        .run_if(in_state(GameplayState::Running)),
                    follow_player.run_if(in_state(AppState::Playing)),
                )
                    .chain(),
            )
            .add_systems(OnEnter(AppState::Playing), grab_cursor)
            .add_systems(OnExit(AppState::Playing), release_cursor)
            .add_systems(OnEnter(GameplayState::Paused), release_cursor)
            .add_systems(
                OnExit(GameplayState::Paused),
                grab_cursor.run_if(in_state(AppState::Playing)),
            );
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(OrbitRig::from_config(&cfg));
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn rotate_rig(input: Res<InputMap>, cfg: Res<GameConfig>, mut rig: ResMut<OrbitRig>) {
    let delta = input.axis2_delta("Look");
    if delta.length_squared() > 0.0 {
        rig.rotate(delta, &cfg);
    }
}

fn follow_player(
    rig: Res<OrbitRig>,
    q_player: Query<&Transform, (With<Player>, Without<Camera3d>)>,
    mut q_cam: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    let Ok(mut cam) = q_cam.single_mut() else {
        return;
    };
    let focus = player.translation + Vec3::Y * 0.5;
    cam.translation = focus - rig.forward() * rig.distance;
    cam.look_at(focus, Vec3::Y);
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
}

fn release_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::None;
    window.cursor_options.visible = true;
}
