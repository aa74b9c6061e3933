//! Boss domain: collaborator seams between the core and its host.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::boss::cooldown::AbilityKind;

/// Opaque lookup handle for something the boss can target. Never owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TargetId(pub u64);

/// Read-only queries the core issues every tick. Implementations must not
/// mutate the boss.
pub trait BossWorld {
    /// Nearest valid target within `radius` of `origin`
    fn find_target(&self, origin: Vec2, radius: f32) -> Option<TargetId>;

    /// Current position of `target`, `None` once it no longer exists
    fn target_position(&self, target: TargetId) -> Option<Vec2>;

    /// Whether the straight segment `from -> to` is blocked
    fn is_obstructed(&self, from: Vec2, to: Vec2) -> bool;

    /// Damageable targets overlapping a circle
    fn overlap_targets(&self, center: Vec2, radius: f32) -> Vec<(TargetId, Vec2)>;
}

/// Side-effect capabilities injected at construction. The core triggers them
/// and never reads anything back.
pub trait BossEffects: Send + Sync {
    fn play_telegraph(&mut self, ability: AbilityKind, position: Vec2, radius: f32, duration: f32);

    fn stop_telegraph(&mut self, ability: AbilityKind);

    fn screen_shake(&mut self, intensity: f32, duration: f32);

    fn spawn_minions(&mut self, position: Vec2, count: u32);
}

/// Effects sink for headless simulation
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEffects;

impl BossEffects for NullEffects {
    fn play_telegraph(&mut self, _: AbilityKind, _: Vec2, _: f32, _: f32) {}

    fn stop_telegraph(&mut self, _: AbilityKind) {}

    fn screen_shake(&mut self, _: f32, _: f32) {}

    fn spawn_minions(&mut self, _: Vec2, _: u32) {}
}
