use ball_roller::app::state::GameplayState;
use ball_roller::core::components::{Pickup, PickupCount, Player};
use ball_roller::gameplay::events::{NotificationPlugin, PickupCollected, WinAchieved};
use ball_roller::GameConfig;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

fn test_app(win_threshold: u32) -> App {
    let mut cfg = GameConfig::default();
    cfg.level.win_threshold = win_threshold;
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(cfg);
    app.insert_resource(PickupCount(0));
    app.init_state::<GameplayState>();
    app.add_plugins(NotificationPlugin);
    app.add_event::<CollisionEvent>();
    app.add_systems(Update, ball_roller::gameplay::pickups::collect_pickups);
    app
}

fn overlap(app: &mut App, player: Entity, pickup: Entity) {
    app.world_mut().send_event(CollisionEvent::Started(
        player,
        pickup,
        CollisionEventFlags::SENSOR,
    ));
}

#[test]
fn collecting_increments_count_and_notifies() {
    let mut app = test_app(3);
    let player = app.world_mut().spawn((Player, Transform::default())).id();
    let pickup = app.world_mut().spawn((Pickup, Transform::default())).id();
    overlap(&mut app, player, pickup);
    app.update();

    assert_eq!(app.world().resource::<PickupCount>().0, 1);
    assert!(app.world().get_entity(pickup).is_err(), "pickup despawned");
    let events = app.world().resource::<Events<PickupCollected>>();
    let mut cursor = events.get_cursor();
    let collected: Vec<_> = cursor.read(events).collect();
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].count, 1);
}

#[test]
fn reaching_threshold_wins_exactly_once() {
    let mut app = test_app(2);
    let player = app.world_mut().spawn((Player, Transform::default())).id();
    let p1 = app.world_mut().spawn((Pickup, Transform::default())).id();
    let p2 = app.world_mut().spawn((Pickup, Transform::default())).id();

    overlap(&mut app, player, p1);
    app.update();
    assert_eq!(
        *app.world().resource::<State<GameplayState>>().get(),
        GameplayState::Running
    );

    overlap(&mut app, player, p2);
    app.update();
    // State transition applies at the next frame boundary.
    app.update();
    assert_eq!(
        *app.world().resource::<State<GameplayState>>().get(),
        GameplayState::Won
    );
    let events = app.world().resource::<Events<WinAchieved>>();
    let mut cursor = events.get_cursor();
    assert_eq!(cursor.read(events).count(), 1);
}

#[test]
fn non_sensor_contact_is_not_a_pickup() {
    let mut app = test_app(1);
    let player = app.world_mut().spawn((Player, Transform::default())).id();
    let pickup = app.world_mut().spawn((Pickup, Transform::default())).id();
    app.world_mut().send_event(CollisionEvent::Started(
        player,
        pickup,
        CollisionEventFlags::empty(),
    ));
    app.update();
    assert_eq!(app.world().resource::<PickupCount>().0, 0);
    assert!(app.world().get_entity(pickup).is_ok());
}

#[test]
fn duplicate_overlap_events_count_once() {
    let mut app = test_app(5);
    let player = app.world_mut().spawn((Player, Transform::default())).id();
    let pickup = app.world_mut().spawn((Pickup, Transform::default())).id();
    overlap(&mut app, player, pickup);
    overlap(&mut app, player, pickup);
    app.update();
    assert_eq!(app.world().resource::<PickupCount>().0, 1);
}
