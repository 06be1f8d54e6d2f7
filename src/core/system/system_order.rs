//! Central system ordering labels to make the fixed-tick sequence explicit.
//! Stages (high-level):
//! 1. PrePhysics (drive force, gravity term, jump resolution before Rapier)
//! 2. Rapier (handled by plugin, fixed schedule)
//! 3. PostPhysicsAdjust (contact-event consumption, out-of-bounds recovery)
//! 4. Rendering (implicit)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // forces applied before the physics simulation step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PostPhysicsAdjustSet; // lightweight corrections after physics
