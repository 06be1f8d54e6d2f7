pub mod events;
pub mod level;
pub mod pickups;
