//! Arena domain: messages between the boss encounter and the rest of the game.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::boss::{AbilityKind, Phase};

/// Request to damage a boss. The only way gameplay code hurts the boss.
#[derive(Debug, Clone)]
pub struct DamageBossEvent {
    pub boss: Entity,
    pub amount: f32,
    /// Used for the weak point cone
    pub attacker_position: Vec2,
}

impl Message for DamageBossEvent {}

/// Boss health changed. `applied` is zero for heals and resets.
#[derive(Debug, Clone)]
pub struct BossDamagedEvent {
    pub boss: Entity,
    pub applied: f32,
    pub current: f32,
    pub max: f32,
}

impl Message for BossDamagedEvent {}

#[derive(Debug, Clone)]
pub struct BossPhaseChangeEvent {
    pub boss: Entity,
    pub new_phase: Phase,
}

impl Message for BossPhaseChangeEvent {}

#[derive(Debug, Clone)]
pub struct BossDefeatedEvent {
    pub boss: Entity,
}

impl Message for BossDefeatedEvent {}

#[derive(Debug, Clone)]
pub struct BossAttackStartedEvent {
    pub boss: Entity,
    pub ability: AbilityKind,
}

impl Message for BossAttackStartedEvent {}

#[derive(Debug, Clone)]
pub struct WeakPointExposedEvent {
    pub boss: Entity,
    pub duration: f32,
}

impl Message for WeakPointExposedEvent {}

/// The boss connected with a target. Receivers apply the damage.
#[derive(Debug, Clone)]
pub struct BossHitTargetEvent {
    pub boss: Entity,
    pub target: Entity,
    pub damage: f32,
    pub source: AbilityKind,
}

impl Message for BossHitTargetEvent {}

/// Show or hide an ability warning
#[derive(Debug, Clone, PartialEq)]
pub enum TelegraphEvent {
    Show {
        boss: Entity,
        ability: AbilityKind,
        position: Vec2,
        radius: f32,
        duration: f32,
    },
    Hide {
        boss: Entity,
        ability: AbilityKind,
    },
}

impl Message for TelegraphEvent {}

#[derive(Debug, Clone)]
pub struct ScreenShakeEvent {
    pub intensity: f32,
    pub duration: f32,
}

impl Message for ScreenShakeEvent {}

#[derive(Debug, Clone)]
pub struct SpawnMinionsEvent {
    pub boss: Entity,
    pub position: Vec2,
    pub count: u32,
}

impl Message for SpawnMinionsEvent {}
