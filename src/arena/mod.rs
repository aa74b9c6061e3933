//! Arena domain: Bevy binding and encounter director for the boss.

mod components;
#[cfg(feature = "dev-tools")]
mod debug;
mod events;
mod resources;
mod spawn;
mod systems;
mod world;

#[cfg(test)]
mod tests;

pub use components::{ArenaWall, BossEncounter, BossTarget, Minion};
pub use events::{
    BossAttackStartedEvent, BossDamagedEvent, BossDefeatedEvent, BossHitTargetEvent,
    BossPhaseChangeEvent, DamageBossEvent, ScreenShakeEvent, SpawnMinionsEvent, TelegraphEvent,
    WeakPointExposedEvent,
};
pub use resources::{
    Announcement, ArenaSettings, ArenaState, CameraShake, EncounterOutcome, phase_announcement,
};
pub use spawn::{spawn_arena_walls, spawn_boss};
pub use world::{
    ArenaLayer, ArenaTarget, ArenaWorld, EffectRequest, QueuedEffects, target_entity, target_id,
};

use bevy::prelude::*;

use crate::arena::spawn::setup_boss_arena;
use crate::arena::systems::{
    apply_boss_damage, despawn_finished_bosses, despawn_orphaned_minions, direct_encounter,
    forward_boss_effects, forward_boss_signals, spawn_summoned_minions, sync_boss_colliders,
    tick_boss_encounters,
};

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ArenaSettings>()
            .init_resource::<ArenaState>()
            .add_message::<DamageBossEvent>()
            .add_message::<BossDamagedEvent>()
            .add_message::<BossPhaseChangeEvent>()
            .add_message::<BossDefeatedEvent>()
            .add_message::<BossAttackStartedEvent>()
            .add_message::<WeakPointExposedEvent>()
            .add_message::<BossHitTargetEvent>()
            .add_message::<TelegraphEvent>()
            .add_message::<ScreenShakeEvent>()
            .add_message::<SpawnMinionsEvent>()
            .add_systems(Startup, setup_boss_arena)
            .add_systems(
                Update,
                (
                    apply_boss_damage,
                    tick_boss_encounters,
                    forward_boss_signals,
                    sync_boss_colliders,
                    forward_boss_effects,
                    direct_encounter,
                    spawn_summoned_minions,
                    despawn_orphaned_minions,
                    despawn_finished_bosses,
                )
                    .chain(),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, debug::boss_debug_hotkeys.before(apply_boss_damage));
    }
}
