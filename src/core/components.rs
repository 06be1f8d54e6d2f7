use bevy::prelude::*;

/// Marker for the player ball; exactly one exists while a session is active.
#[derive(Component, Debug)]
pub struct Player;

/// Collectible sensor; despawned on contact with the player.
#[derive(Component, Debug)]
pub struct Pickup;

/// Everything spawned for one play session; despawned wholesale on restart.
#[derive(Component, Debug)]
pub struct SessionScoped;

/// Where the ball respawns after falling out of bounds.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RecoveryPoint(pub Vec3);

impl Default for RecoveryPoint {
    fn default() -> Self {
        Self(Vec3::new(0.0, 1.0, 0.0))
    }
}

/// Running pickup total for the current session.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PickupCount(pub u32);
