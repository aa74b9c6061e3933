//! Arena domain: unit tests for the world adapter, signal forwarding and director.

use avian2d::prelude::{Collider, ColliderDisabled};
use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::systems::{
    apply_boss_damage, despawn_finished_bosses, despawn_orphaned_minions, direct_encounter,
    forward_boss_effects, forward_boss_signals, spawn_summoned_minions, sync_boss_colliders,
};
use super::{
    ArenaSettings, ArenaState, ArenaTarget, ArenaWorld, BossAttackStartedEvent, BossDamagedEvent,
    BossDefeatedEvent, BossEncounter, BossHitTargetEvent, BossPhaseChangeEvent, BossTarget,
    DamageBossEvent, EffectRequest, EncounterOutcome, Minion, QueuedEffects, ScreenShakeEvent,
    SpawnMinionsEvent, TelegraphEvent, WeakPointExposedEvent, spawn_boss, target_entity,
    target_id,
};
use crate::boss::{AbilityKind, Boss, BossConfig, BossEffects, BossWorld, Phase};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Everything a message reader saw, in order
#[derive(Resource)]
struct Collected<T: Message + Clone>(Vec<T>);

impl<T: Message + Clone> Default for Collected<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn collect<T: Message + Clone>(mut reader: MessageReader<T>, mut out: ResMut<Collected<T>>) {
    out.0.extend(reader.read().cloned());
}

fn collected<T: Message + Clone>(app: &App) -> Vec<T> {
    app.world().resource::<Collected<T>>().0.clone()
}

fn encounter_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<ArenaSettings>()
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
        .init_resource::<Collected<BossDamagedEvent>>()
        .init_resource::<Collected<BossPhaseChangeEvent>>()
        .init_resource::<Collected<BossHitTargetEvent>>()
        .init_resource::<Collected<BossAttackStartedEvent>>()
        .init_resource::<Collected<TelegraphEvent>>()
        .add_systems(
            Update,
            (
                apply_boss_damage,
                forward_boss_signals,
                sync_boss_colliders,
                forward_boss_effects,
                direct_encounter,
                spawn_summoned_minions,
                despawn_orphaned_minions,
                despawn_finished_bosses,
                collect::<BossDamagedEvent>,
                collect::<BossPhaseChangeEvent>,
                collect::<BossHitTargetEvent>,
                collect::<BossAttackStartedEvent>,
                collect::<TelegraphEvent>,
            )
                .chain(),
        );
    app
}

fn spawn_encounter(app: &mut App, config: BossConfig) -> Entity {
    let effects = QueuedEffects::default();
    let boss = Boss::with_seed(config, Vec2::ZERO, Box::new(effects.clone()), 3)
        .expect("valid config");
    app.world_mut()
        .spawn(BossEncounter { boss, effects })
        .id()
}

fn minion_count(app: &mut App) -> usize {
    app.world_mut().query::<&Minion>().iter(app.world()).count()
}

fn boss_mut(app: &mut App, entity: Entity) -> Mut<'_, BossEncounter> {
    app.world_mut()
        .get_mut::<BossEncounter>(entity)
        .expect("boss entity")
}

// ---------------------------------------------------------------------------
// World adapter
// ---------------------------------------------------------------------------

#[test]
fn test_arena_world_finds_nearest_target() {
    let mut ecs = World::new();
    let near = ecs.spawn_empty().id();
    let far = ecs.spawn_empty().id();
    let world = ArenaWorld::new(vec![
        ArenaTarget::new(far, Vec2::new(10.0, 0.0)),
        ArenaTarget::new(near, Vec2::new(4.0, 0.0)),
    ]);

    assert_eq!(world.find_target(Vec2::ZERO, 15.0), Some(target_id(near)));
    assert_eq!(world.find_target(Vec2::ZERO, 3.0), None);
    assert_eq!(target_entity(target_id(far)), Some(far));
    assert_eq!(
        world.target_position(target_id(far)),
        Some(Vec2::new(10.0, 0.0))
    );
    assert_eq!(world.overlap_targets(Vec2::ZERO, 5.0).len(), 1);
}

#[test]
fn test_arena_world_obstruction() {
    let wall = |from: Vec2, to: Vec2| (from.x < 2.0) != (to.x < 2.0);
    let world = ArenaWorld::new(Vec::new()).with_obstruction(&wall);
    assert!(world.is_obstructed(Vec2::ZERO, Vec2::new(3.0, 0.0)));
    assert!(!world.is_obstructed(Vec2::ZERO, Vec2::new(1.0, 0.0)));

    let open = ArenaWorld::new(Vec::new());
    assert!(!open.is_obstructed(Vec2::ZERO, Vec2::new(3.0, 0.0)));
}

#[test]
fn test_queued_effects_share_one_queue() {
    let effects = QueuedEffects::default();
    let mut handle = effects.clone();
    handle.screen_shake(0.8, 1.0);
    handle.stop_telegraph(AbilityKind::Charge);

    assert_eq!(
        effects.drain(),
        vec![
            EffectRequest::ScreenShake {
                intensity: 0.8,
                duration: 1.0
            },
            EffectRequest::StopTelegraph(AbilityKind::Charge),
        ]
    );
    assert!(effects.drain().is_empty());
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

#[test]
fn test_damage_message_reaches_boss() {
    let mut app = encounter_app();
    let boss = spawn_encounter(&mut app, BossConfig::default());
    app.update();

    app.world_mut().write_message(DamageBossEvent {
        boss,
        amount: 2000.0,
        attacker_position: Vec2::new(5.0, 0.0),
    });
    app.update();

    let damaged = collected::<BossDamagedEvent>(&app);
    assert_eq!(damaged.len(), 1);
    assert_eq!(damaged[0].applied, 2000.0);
    assert_eq!(damaged[0].current, 3000.0);

    let phases = collected::<BossPhaseChangeEvent>(&app);
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].new_phase, Phase::Phase2);

    let state = app.world().resource::<ArenaState>();
    assert_eq!(state.phase, Phase::Phase2);
    assert!(state.announcement.is_some());
}

#[test]
fn test_boss_hits_are_mapped_to_entities() {
    let mut app = encounter_app();
    let boss = spawn_encounter(&mut app, BossConfig::default());
    let diver = app.world_mut().spawn(BossTarget).id();

    // Drive the boss directly: a diver in claw range
    let world = ArenaWorld::new(vec![ArenaTarget::new(diver, Vec2::new(3.0, 0.0))]);
    {
        let mut encounter = boss_mut(&mut app, boss);
        for _ in 0..4 {
            encounter.boss.tick(0.25, &world);
        }
    }
    app.update();

    let hits = collected::<BossHitTargetEvent>(&app);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, diver);
    assert_eq!(hits[0].source, AbilityKind::ClawCombo);

    let attacks = collected::<BossAttackStartedEvent>(&app);
    assert_eq!(attacks.len(), 1);
    assert_eq!(attacks[0].ability, AbilityKind::ClawCombo);
}

#[test]
fn test_effects_become_messages_and_minions() {
    let mut app = encounter_app();
    let boss = spawn_encounter(&mut app, BossConfig::default());
    app.update();

    {
        let encounter = boss_mut(&mut app, boss);
        let mut effects = encounter.effects.clone();
        effects.play_telegraph(AbilityKind::Earthquake, Vec2::ZERO, 10.0, 2.0);
        effects.screen_shake(0.8, 1.0);
        effects.spawn_minions(Vec2::ZERO, 3);
    }
    app.update();

    let telegraphs = collected::<TelegraphEvent>(&app);
    assert_eq!(
        telegraphs,
        vec![TelegraphEvent::Show {
            boss,
            ability: AbilityKind::Earthquake,
            position: Vec2::ZERO,
            radius: 10.0,
            duration: 2.0,
        }]
    );

    // Spawned through commands, visible after the update
    let minions = app
        .world_mut()
        .query::<&Minion>()
        .iter(app.world())
        .filter(|minion| minion.summoner == boss)
        .count();
    assert_eq!(minions, 3);

    let state = app.world().resource::<ArenaState>();
    assert!(state.shake.is_some());
}

#[test]
fn test_director_seals_then_unseals_on_defeat() {
    let mut app = encounter_app();
    let config = BossConfig {
        death_fade_duration: 0.0,
        ..BossConfig::default()
    };
    let boss = spawn_encounter(&mut app, config);
    app.update();

    {
        let state = app.world().resource::<ArenaState>();
        assert!(state.locked);
        assert_eq!(state.outcome, EncounterOutcome::Pending);
    }

    boss_mut(&mut app, boss).boss.force_kill();
    app.update();

    let state = app.world().resource::<ArenaState>();
    assert!(!state.locked);
    assert_eq!(state.outcome, EncounterOutcome::Victory);
    assert_eq!(state.phase, Phase::Defeated);

    // Fade of zero: finished on the first tick after death
    let world = ArenaWorld::new(Vec::new());
    boss_mut(&mut app, boss).boss.tick(0.1, &world);
    app.update();
    assert!(app.world().get_entity(boss).is_err());
}

#[test]
fn test_spawn_boss_rejects_invalid_config() {
    let mut app = App::new();
    let config = BossConfig {
        max_health: -1.0,
        ..BossConfig::default()
    };

    let result = {
        let mut commands = app.world_mut().commands();
        spawn_boss(&mut commands, config, &ArenaSettings::default())
    };
    app.world_mut().flush();

    assert!(result.is_err());
    let bosses = app
        .world_mut()
        .query::<&BossEncounter>()
        .iter(app.world())
        .count();
    assert_eq!(bosses, 0);
}

#[test]
fn test_arena_state_keeps_stronger_shake() {
    let mut state = ArenaState::default();
    state.shake(0.8, 1.0);
    state.shake(0.2, 5.0);
    assert_eq!(state.shake.map(|s| s.intensity), Some(0.8));

    state.announce("hello", 1.0);
    state.tick(1.0);
    assert!(state.shake.is_none());
    assert!(state.announcement.is_none());
}

#[test]
fn test_dead_boss_stops_colliding() {
    let mut app = encounter_app();
    let boss = {
        let mut commands = app.world_mut().commands();
        spawn_boss(&mut commands, BossConfig::default(), &ArenaSettings::default())
            .expect("valid config")
    };
    app.world_mut().flush();
    app.update();
    assert!(app.world().get::<Collider>(boss).is_some());
    assert!(app.world().get::<ColliderDisabled>(boss).is_none());

    boss_mut(&mut app, boss).boss.force_kill();
    app.update();
    assert!(app.world().get::<ColliderDisabled>(boss).is_some());

    boss_mut(&mut app, boss).boss.reset();
    app.update();
    assert!(app.world().get::<ColliderDisabled>(boss).is_none());
}

#[test]
fn test_minions_cleared_with_their_summoner() {
    let mut app = encounter_app();
    let boss = spawn_encounter(&mut app, BossConfig::default());
    app.update();

    {
        let encounter = boss_mut(&mut app, boss);
        let mut effects = encounter.effects.clone();
        effects.spawn_minions(Vec2::ZERO, 3);
    }
    app.update();
    assert_eq!(minion_count(&mut app), 3);

    // Still there while the summoner lives
    app.update();
    assert_eq!(minion_count(&mut app), 3);

    boss_mut(&mut app, boss).boss.force_kill();
    app.update();
    assert_eq!(minion_count(&mut app), 0);
}

#[test]
fn test_minions_of_missing_summoner_are_removed() {
    let mut app = encounter_app();
    let gone = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(gone);
    app.world_mut().spawn(Minion { summoner: gone });

    app.update();
    assert_eq!(minion_count(&mut app), 0);
}
