//! One-way notifications from the core to the presentation layer. The core
//! fires these and never reads anything back.
use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct PickupCollected {
    pub count: u32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct WinAchieved {
    pub pickups: u32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PauseChanged {
    pub paused: bool,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct OutOfBounds;

pub struct NotificationPlugin;

impl Plugin for NotificationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PickupCollected>()
            .add_event::<WinAchieved>()
            .add_event::<PauseChanged>()
            .add_event::<OutOfBounds>();
    }
}
