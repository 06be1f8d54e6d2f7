use ball_roller::core::components::Player;
use ball_roller::player::jump::consume_ground_contacts;
use ball_roller::player::LocomotionState;
use ball_roller::GameConfig;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

// These tests drive `consume_ground_contacts` with hand-written collision
// events in a world without a live physics pipeline: the grounding probe
// cannot confirm contact, so the observable contract is "any qualifying
// contact event consumes the buffer".

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig::default());
    app.add_event::<CollisionEvent>();
    app.add_systems(Update, consume_ground_contacts);
    app
}

fn spawn_player(app: &mut App, buffered: bool) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            LocomotionState {
                jump_buffered: buffered,
            },
            Transform::default(),
            Velocity::default(),
            ReadMassProperties::default(),
            ExternalImpulse::default(),
        ))
        .id()
}

fn send_started(app: &mut App, a: Entity, b: Entity, flags: CollisionEventFlags) {
    app.world_mut()
        .send_event(CollisionEvent::Started(a, b, flags));
}

#[test]
fn contact_event_consumes_buffer() {
    let mut app = test_app();
    let player = spawn_player(&mut app, true);
    let ground = app.world_mut().spawn(Transform::default()).id();
    send_started(&mut app, player, ground, CollisionEventFlags::empty());
    app.update();
    let state = app.world().get::<LocomotionState>(player).unwrap();
    assert!(!state.jump_buffered, "grounding contact must clear the buffer");
}

#[test]
fn sensor_contact_does_not_touch_buffer() {
    let mut app = test_app();
    let player = spawn_player(&mut app, true);
    let pickup = app.world_mut().spawn(Transform::default()).id();
    send_started(&mut app, player, pickup, CollisionEventFlags::SENSOR);
    app.update();
    let state = app.world().get::<LocomotionState>(player).unwrap();
    assert!(state.jump_buffered, "sensor overlap is not a grounding event");
}

#[test]
fn unrelated_contact_does_not_touch_buffer() {
    let mut app = test_app();
    let player = spawn_player(&mut app, true);
    let a = app.world_mut().spawn(Transform::default()).id();
    let b = app.world_mut().spawn(Transform::default()).id();
    send_started(&mut app, a, b, CollisionEventFlags::empty());
    app.update();
    let state = app.world().get::<LocomotionState>(player).unwrap();
    assert!(state.jump_buffered);
}

// With a live pipeline the probe can confirm contact, so the full buffered
// path is observable: one impulse per buffer-set, and only one.
#[test]
fn buffered_jump_fires_exactly_once_on_confirmed_ground_contact() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
    ));
    app.insert_resource(GameConfig::default());
    // Ground slab, top face at y = 0.
    let ground = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, -0.25, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(20.0, 0.25, 20.0),
        ))
        .id();
    let player = app
        .world_mut()
        .spawn((
            Player,
            LocomotionState {
                jump_buffered: true,
            },
            Transform::from_xyz(0.0, 0.5, 0.0),
            RigidBody::Dynamic,
            Collider::ball(0.5),
            ColliderMassProperties::Density(1.0),
            Velocity::default(),
            ExternalImpulse::default(),
            ReadMassProperties::default(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();
    // Let rapier ingest the colliders and write back the mass properties.
    app.update();
    app.update();
    // Drop whatever contact events settling produced; the grounding event
    // under test is the hand-fed one below.
    app.world_mut().resource_mut::<Events<CollisionEvent>>().clear();

    app.world_mut().send_event(CollisionEvent::Started(
        player,
        ground,
        CollisionEventFlags::empty(),
    ));
    app.world_mut()
        .run_system_once(consume_ground_contacts)
        .unwrap();
    let fired = app.world().get::<ExternalImpulse>(player).unwrap().impulse;
    assert!(fired.y > 0.0, "confirmed contact must fire the impulse");
    assert!(
        !app.world().get::<LocomotionState>(player).unwrap().jump_buffered,
        "buffer consumed"
    );

    // A second grounding event with no intervening buffer-set must not add
    // another impulse.
    app.world_mut().send_event(CollisionEvent::Started(
        player,
        ground,
        CollisionEventFlags::empty(),
    ));
    app.world_mut()
        .run_system_once(consume_ground_contacts)
        .unwrap();
    assert_eq!(
        app.world().get::<ExternalImpulse>(player).unwrap().impulse,
        fired
    );
}

#[test]
fn second_contact_without_rebuffer_is_inert() {
    let mut app = test_app();
    let player = spawn_player(&mut app, true);
    let ground = app.world_mut().spawn(Transform::default()).id();
    send_started(&mut app, player, ground, CollisionEventFlags::empty());
    app.update();
    assert!(!app.world().get::<LocomotionState>(player).unwrap().jump_buffered);

    // A later contact with no intervening buffer-set changes nothing.
    send_started(&mut app, player, ground, CollisionEventFlags::empty());
    app.update();
    assert!(!app.world().get::<LocomotionState>(player).unwrap().jump_buffered);
    let impulse = app.world().get::<ExternalImpulse>(player).unwrap();
    assert_eq!(impulse.impulse, Vec3::ZERO);
}
