//! Arena domain: components attached to encounter entities.

use bevy::prelude::*;

use crate::arena::world::QueuedEffects;
use crate::boss::Boss;

/// A live boss encounter. Owns the boss exclusively; systems drive it through
/// its own commands only.
#[derive(Component, Debug)]
pub struct BossEncounter {
    pub boss: Boss,
    /// Shared with the boss; drained after every tick
    pub effects: QueuedEffects,
}

/// Something the boss may detect, chase and hit
#[derive(Component, Debug, Default)]
pub struct BossTarget;

#[derive(Component, Debug)]
pub struct ArenaWall;

#[derive(Component, Debug)]
pub struct Minion {
    pub summoner: Entity,
}
