//! Arena domain: the boss's view of the ECS world and its effect sink.

use std::sync::{Arc, Mutex, PoisonError};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::boss::{AbilityKind, BossEffects, BossWorld, TargetId};

/// Physics layers for collision filtering inside the arena
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum ArenaLayer {
    #[default]
    Default,
    /// Static arena bounds and pillars, block movement and line of sight
    Wall,
    Boss,
    /// Anything the boss may hunt (divers, decoys)
    Target,
    Minion,
}

/// Stable handle for an entity the boss can target.
pub fn target_id(entity: Entity) -> TargetId {
    TargetId(entity.to_bits())
}

/// Inverse of [`target_id`]. `None` for ids no entity could have produced.
pub fn target_entity(id: TargetId) -> Option<Entity> {
    Entity::try_from_bits(id.0)
}

/// A targetable entity as seen at the start of the tick.
#[derive(Debug, Clone, Copy)]
pub struct ArenaTarget {
    pub id: TargetId,
    pub entity: Entity,
    pub position: Vec2,
}

impl ArenaTarget {
    pub fn new(entity: Entity, position: Vec2) -> Self {
        Self {
            id: target_id(entity),
            entity,
            position,
        }
    }
}

/// Per-tick [`BossWorld`] built from queried transforms.
/// Obstruction defaults to an open field unless a ray test is supplied.
pub struct ArenaWorld<'a> {
    targets: Vec<ArenaTarget>,
    obstruction: Option<&'a dyn Fn(Vec2, Vec2) -> bool>,
}

impl<'a> ArenaWorld<'a> {
    pub fn new(targets: Vec<ArenaTarget>) -> Self {
        Self {
            targets,
            obstruction: None,
        }
    }

    pub fn with_obstruction(mut self, obstruction: &'a dyn Fn(Vec2, Vec2) -> bool) -> Self {
        self.obstruction = Some(obstruction);
        self
    }
}

impl BossWorld for ArenaWorld<'_> {
    fn find_target(&self, origin: Vec2, radius: f32) -> Option<TargetId> {
        self.targets
            .iter()
            .map(|target| (target, target.position.distance(origin)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(target, _)| target.id)
    }

    fn target_position(&self, target: TargetId) -> Option<Vec2> {
        self.targets
            .iter()
            .find(|candidate| candidate.id == target)
            .map(|candidate| candidate.position)
    }

    fn is_obstructed(&self, from: Vec2, to: Vec2) -> bool {
        self.obstruction.is_some_and(|blocked| blocked(from, to))
    }

    fn overlap_targets(&self, center: Vec2, radius: f32) -> Vec<(TargetId, Vec2)> {
        self.targets
            .iter()
            .filter(|target| target.position.distance(center) <= radius)
            .map(|target| (target.id, target.position))
            .collect()
    }
}

/// Side effect requested by a boss during its tick.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectRequest {
    Telegraph {
        ability: AbilityKind,
        position: Vec2,
        radius: f32,
        duration: f32,
    },
    StopTelegraph(AbilityKind),
    ScreenShake {
        intensity: f32,
        duration: f32,
    },
    SpawnMinions {
        position: Vec2,
        count: u32,
    },
}

/// [`BossEffects`] that queues requests for the ECS to pick up after the tick.
/// Clones share one queue: the boss owns one, the encounter component the other.
#[derive(Debug, Clone, Default)]
pub struct QueuedEffects {
    requests: Arc<Mutex<Vec<EffectRequest>>>,
}

impl QueuedEffects {
    pub fn drain(&self) -> Vec<EffectRequest> {
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *requests)
    }

    fn push(&self, request: EffectRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

impl BossEffects for QueuedEffects {
    fn play_telegraph(&mut self, ability: AbilityKind, position: Vec2, radius: f32, duration: f32) {
        self.push(EffectRequest::Telegraph {
            ability,
            position,
            radius,
            duration,
        });
    }

    fn stop_telegraph(&mut self, ability: AbilityKind) {
        self.push(EffectRequest::StopTelegraph(ability));
    }

    fn screen_shake(&mut self, intensity: f32, duration: f32) {
        self.push(EffectRequest::ScreenShake {
            intensity,
            duration,
        });
    }

    fn spawn_minions(&mut self, position: Vec2, count: u32) {
        self.push(EffectRequest::SpawnMinions { position, count });
    }
}
