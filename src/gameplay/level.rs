//! Session setup: arena, player ball, pickup ring, lighting. Everything is
//! `SessionScoped` and torn down on leaving `Playing` so restarts are clean.
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::app::state::AppState;
use crate::core::components::{Pickup, PickupCount, Player, RecoveryPoint, SessionScoped};
use crate::core::config::config::GameConfig;
use crate::player::LocomotionState;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickupCount>()
            .init_resource::<RecoveryPoint>()
            .add_systems(OnEnter(AppState::Playing), spawn_level)
            .add_systems(OnExit(AppState::Playing), despawn_level);
    }
}

fn spawn_level(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let half = cfg.level.ground_half_extent;
    let wall_h = cfg.level.wall_height;
    let spawn = Vec3::new(0.0, cfg.player.spawn_height, 0.0);

    commands.insert_resource(RecoveryPoint(spawn));
    commands.insert_resource(PickupCount(0));

    // Ground slab
    commands.spawn((
        SessionScoped,
        Mesh3d(meshes.add(Cuboid::new(half * 2.0, 0.5, half * 2.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.42, 0.5),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.25, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(half, 0.25, half),
    ));

    // Perimeter walls
    let wall_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.28, 0.33),
        ..default()
    });
    let wall_specs = [
        (Vec3::new(0.0, wall_h * 0.5, -half), Vec3::new(half, wall_h * 0.5, 0.25)),
        (Vec3::new(0.0, wall_h * 0.5, half), Vec3::new(half, wall_h * 0.5, 0.25)),
        (Vec3::new(-half, wall_h * 0.5, 0.0), Vec3::new(0.25, wall_h * 0.5, half)),
        (Vec3::new(half, wall_h * 0.5, 0.0), Vec3::new(0.25, wall_h * 0.5, half)),
    ];
    for (pos, he) in wall_specs {
        commands.spawn((
            SessionScoped,
            Mesh3d(meshes.add(Cuboid::new(he.x * 2.0, he.y * 2.0, he.z * 2.0))),
            MeshMaterial3d(wall_mat.clone()),
            Transform::from_translation(pos),
            RigidBody::Fixed,
            Collider::cuboid(he.x, he.y, he.z),
        ));
    }

    // Pickup ring
    let mut rng = rand::thread_rng();
    let pickup_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.8, 0.1),
        emissive: LinearRgba::new(0.4, 0.3, 0.0, 1.0),
        ..default()
    });
    let pickup_mesh = meshes.add(Cuboid::new(0.5, 0.5, 0.5));
    let n = cfg.level.pickup_count.max(1);
    for i in 0..cfg.level.pickup_count {
        let angle = i as f32 / n as f32 * std::f32::consts::TAU;
        let pos = Vec3::new(
            angle.cos() * cfg.level.pickup_ring_radius,
            0.6,
            angle.sin() * cfg.level.pickup_ring_radius,
        );
        commands.spawn((
            Pickup,
            SessionScoped,
            Mesh3d(pickup_mesh.clone()),
            MeshMaterial3d(pickup_mat.clone()),
            Transform::from_translation(pos)
                .with_rotation(Quat::from_rotation_y(rng.gen_range(0.0..std::f32::consts::TAU))),
            Collider::cuboid(0.25, 0.25, 0.25),
            Sensor,
        ));
    }

    // Player ball
    commands.spawn((
        Player,
        SessionScoped,
        LocomotionState::default(),
        Mesh3d(meshes.add(Sphere::new(cfg.player.ball_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.2, 0.2),
            perceptual_roughness: 0.3,
            ..default()
        })),
        Transform::from_translation(spawn),
        RigidBody::Dynamic,
        Collider::ball(cfg.player.ball_radius),
        ColliderMassProperties::Density(cfg.player.ball_density),
        Velocity::default(),
        ExternalForce::default(),
        ExternalImpulse::default(),
        ReadMassProperties::default(),
        ActiveEvents::COLLISION_EVENTS,
        Ccd::enabled(),
    ));

    commands.spawn((
        SessionScoped,
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!(
        target: "level",
        "session spawned: {} pickups, win at {}",
        cfg.level.pickup_count, cfg.level.win_threshold
    );
}

fn despawn_level(mut commands: Commands, q: Query<Entity, With<SessionScoped>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
    commands.insert_resource(PickupCount(0));
}
