//! Pickup collection and the win transition.
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
use smallvec::SmallVec;

use crate::app::state::{AppState, GameplayState};
use crate::core::components::{Pickup, PickupCount, Player};
use crate::core::config::config::GameConfig;
use crate::gameplay::events::{PickupCollected, WinAchieved};

pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (collect_pickups, spin_pickups)
                .run_if(in_state(AppState::Playing))
                .run_if(in_state(GameplayState::Running)),
        );
    }
}

/// Sensor intersections between the player and pickups. Each pickup is
/// collected at most once (despawn is deferred, so de-dup within the frame).
pub fn collect_pickups(
    mut commands: Commands,
    mut events: EventReader<CollisionEvent>,
    cfg: Res<GameConfig>,
    mut count: ResMut<PickupCount>,
    mut collected_evw: EventWriter<PickupCollected>,
    mut win_evw: EventWriter<WinAchieved>,
    mut next: ResMut<NextState<GameplayState>>,
    q_player: Query<Entity, With<Player>>,
    q_pickup: Query<Entity, With<Pickup>>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    let mut collected_this_frame: SmallVec<[Entity; 4]> = SmallVec::new();
    for ev in events.read() {
        let CollisionEvent::Started(a, b, flags) = ev else {
            continue;
        };
        if !flags.contains(CollisionEventFlags::SENSOR) {
            continue;
        }
        let other = if *a == player {
            *b
        } else if *b == player {
            *a
        } else {
            continue;
        };
        if !q_pickup.contains(other) || collected_this_frame.contains(&other) {
            continue;
        }
        collected_this_frame.push(other);
        commands.entity(other).despawn();
        count.0 += 1;
        collected_evw.write(PickupCollected { count: count.0 });
        info!(target: "pickups", "collected {}/{}", count.0, cfg.level.win_threshold);
        if count.0 >= cfg.level.win_threshold {
            win_evw.write(WinAchieved { pickups: count.0 });
            next.set(GameplayState::Won);
        }
    }
}

fn spin_pickups(time: Res<Time>, mut q: Query<&mut Transform, With<Pickup>>) {
    let angle = 1.2 * time.delta_secs();
    for mut tf in &mut q {
        tf.rotate_y(angle);
    }
}
