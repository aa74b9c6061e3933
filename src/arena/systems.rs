//! Arena domain: systems driving boss encounters inside the ECS.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::arena::components::{BossEncounter, BossTarget, Minion};
use crate::arena::events::{
    BossAttackStartedEvent, BossDamagedEvent, BossDefeatedEvent, BossHitTargetEvent,
    BossPhaseChangeEvent, DamageBossEvent, ScreenShakeEvent, SpawnMinionsEvent, TelegraphEvent,
    WeakPointExposedEvent,
};
use crate::arena::resources::{ArenaSettings, ArenaState, EncounterOutcome, phase_announcement};
use crate::arena::world::{ArenaLayer, ArenaTarget, ArenaWorld, EffectRequest, target_entity};
use crate::boss::{BossSignal, Phase};

pub(crate) fn apply_boss_damage(
    mut damage_events: MessageReader<DamageBossEvent>,
    mut bosses: Query<&mut BossEncounter>,
) {
    for event in damage_events.read() {
        let Ok(mut encounter) = bosses.get_mut(event.boss) else {
            debug!("Damage for missing boss {:?} dropped", event.boss);
            continue;
        };
        let applied = encounter
            .boss
            .take_damage(event.amount, event.attacker_position);
        if applied == 0.0 {
            debug!("Boss {:?} absorbed {} damage", event.boss, event.amount);
        }
    }
}

pub(crate) fn tick_boss_encounters(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    targets: Query<(Entity, &Transform), (With<BossTarget>, Without<BossEncounter>)>,
    mut bosses: Query<(&mut BossEncounter, &mut Transform)>,
) {
    let dt = time.delta_secs();

    // Only walls block the boss; divers and minions never do
    let wall_filter = SpatialQueryFilter::from_mask(ArenaLayer::Wall);
    let blocked = |from: Vec2, to: Vec2| {
        let offset = to - from;
        let Ok(direction) = Dir2::new(offset) else {
            return false;
        };
        spatial_query
            .cast_ray(from, direction, offset.length(), true, &wall_filter)
            .is_some()
    };

    let world = ArenaWorld::new(
        targets
            .iter()
            .map(|(entity, transform)| ArenaTarget::new(entity, transform.translation.truncate()))
            .collect(),
    )
    .with_obstruction(&blocked);

    for (mut encounter, mut transform) in &mut bosses {
        encounter.boss.tick(dt, &world);

        let position = encounter.boss.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn forward_boss_signals(
    mut bosses: Query<(Entity, &mut BossEncounter)>,
    targets: Query<Entity, With<BossTarget>>,
    mut damaged: MessageWriter<BossDamagedEvent>,
    mut phase_changes: MessageWriter<BossPhaseChangeEvent>,
    mut defeated: MessageWriter<BossDefeatedEvent>,
    mut attacks: MessageWriter<BossAttackStartedEvent>,
    mut weak_points: MessageWriter<WeakPointExposedEvent>,
    mut hits: MessageWriter<BossHitTargetEvent>,
) {
    for (boss, mut encounter) in &mut bosses {
        let mut applied = 0.0;

        for signal in encounter.boss.drain_signals() {
            match signal {
                BossSignal::TakeDamage(amount) => applied += amount,
                BossSignal::HealthChanged { current, max } => {
                    damaged.write(BossDamagedEvent {
                        boss,
                        applied,
                        current,
                        max,
                    });
                    applied = 0.0;
                }
                BossSignal::PhaseChanged(new_phase) => {
                    phase_changes.write(BossPhaseChangeEvent { boss, new_phase });
                }
                BossSignal::Defeated => {
                    defeated.write(BossDefeatedEvent { boss });
                }
                BossSignal::AttackStarted(ability) => {
                    attacks.write(BossAttackStartedEvent { boss, ability });
                }
                BossSignal::WeakPointExposed => {
                    weak_points.write(WeakPointExposedEvent {
                        boss,
                        duration: encounter.boss.config().weak_point.duration,
                    });
                }
                BossSignal::TargetHit {
                    target,
                    damage,
                    source,
                } => {
                    let Some(entity) = target_entity(target).filter(|e| targets.contains(*e))
                    else {
                        debug!("Boss hit vanished target {:?}", target);
                        continue;
                    };
                    hits.write(BossHitTargetEvent {
                        boss,
                        target: entity,
                        damage,
                        source,
                    });
                }
                other => debug!("Boss {:?}: {:?}", boss, other),
            }
        }
    }
}

pub(crate) fn forward_boss_effects(
    bosses: Query<(Entity, &BossEncounter)>,
    mut telegraphs: MessageWriter<TelegraphEvent>,
    mut shakes: MessageWriter<ScreenShakeEvent>,
    mut summons: MessageWriter<SpawnMinionsEvent>,
) {
    for (boss, encounter) in &bosses {
        for request in encounter.effects.drain() {
            match request {
                EffectRequest::Telegraph {
                    ability,
                    position,
                    radius,
                    duration,
                } => {
                    telegraphs.write(TelegraphEvent::Show {
                        boss,
                        ability,
                        position,
                        radius,
                        duration,
                    });
                }
                EffectRequest::StopTelegraph(ability) => {
                    telegraphs.write(TelegraphEvent::Hide { boss, ability });
                }
                EffectRequest::ScreenShake {
                    intensity,
                    duration,
                } => {
                    shakes.write(ScreenShakeEvent {
                        intensity,
                        duration,
                    });
                }
                EffectRequest::SpawnMinions { position, count } => {
                    summons.write(SpawnMinionsEvent {
                        boss,
                        position,
                        count,
                    });
                }
            }
        }
    }
}

/// Encounter director: arena lock, announcements, outcome.
pub(crate) fn direct_encounter(
    time: Res<Time>,
    settings: Res<ArenaSettings>,
    mut state: ResMut<ArenaState>,
    spawned: Query<Entity, Added<BossEncounter>>,
    mut phase_changes: MessageReader<BossPhaseChangeEvent>,
    mut defeated: MessageReader<BossDefeatedEvent>,
    mut shakes: MessageReader<ScreenShakeEvent>,
) {
    state.tick(time.delta_secs());

    if !spawned.is_empty() {
        state.begin_encounter();
        info!("Arena sealed");
    }

    for event in phase_changes.read() {
        state.phase = event.new_phase;
        if let Some(text) = phase_announcement(event.new_phase) {
            state.announce(text, settings.announcement_time);
        }
        info!("Boss {:?} entered {:?}", event.boss, event.new_phase);
    }

    for event in shakes.read() {
        state.shake(event.intensity, event.duration);
    }

    for event in defeated.read() {
        state.phase = Phase::Defeated;
        state.outcome = EncounterOutcome::Victory;
        state.locked = false;
        if let Some(text) = phase_announcement(Phase::Defeated) {
            state.announce(text, settings.announcement_time);
        }
        info!("Boss {:?} defeated, arena unsealed", event.boss);
    }
}

pub(crate) fn spawn_summoned_minions(
    mut commands: Commands,
    settings: Res<ArenaSettings>,
    mut summons: MessageReader<SpawnMinionsEvent>,
) {
    for event in summons.read() {
        for i in 0..event.count {
            let angle = std::f32::consts::TAU * i as f32 / event.count as f32;
            let position = event.position + Vec2::from_angle(angle) * settings.minion_ring_radius;

            commands.spawn((
                Minion {
                    summoner: event.boss,
                },
                Name::new("Claw Drone"),
                Sprite {
                    color: Color::srgb(0.7, 0.4, 0.2),
                    custom_size: Some(Vec2::splat(0.8)),
                    ..default()
                },
                Transform::from_translation(position.extend(1.0)),
                RigidBody::Kinematic,
                Collider::circle(0.4),
                CollisionLayers::new(ArenaLayer::Minion, [ArenaLayer::Wall, ArenaLayer::Target]),
            ));
        }
        info!("Spawned {} minions for {:?}", event.count, event.boss);
    }
}

/// A dead boss stops colliding for its death fade; a reset one collides again.
pub(crate) fn sync_boss_colliders(
    mut commands: Commands,
    bosses: Query<(Entity, &BossEncounter, Has<ColliderDisabled>)>,
) {
    for (entity, encounter, disabled) in &bosses {
        let enabled = !encounter.boss.is_dead();
        if enabled && disabled {
            commands.entity(entity).remove::<ColliderDisabled>();
        } else if !enabled && !disabled {
            debug!("{}: collider disabled", encounter.boss.config().name);
            commands.entity(entity).insert(ColliderDisabled);
        }
    }
}

/// Minions outlive neither their summoner nor its defeat.
pub(crate) fn despawn_orphaned_minions(
    mut commands: Commands,
    minions: Query<(Entity, &Minion)>,
    bosses: Query<&BossEncounter>,
) {
    for (entity, minion) in &minions {
        let summoner_alive = bosses
            .get(minion.summoner)
            .is_ok_and(|encounter| !encounter.boss.is_dead());
        if !summoner_alive {
            commands.entity(entity).despawn();
        }
    }
}

/// Remove bosses whose death fade has finished.
pub(crate) fn despawn_finished_bosses(
    mut commands: Commands,
    bosses: Query<(Entity, &BossEncounter)>,
) {
    for (entity, encounter) in &bosses {
        if encounter.boss.is_despawned() {
            info!("Despawning {}", encounter.boss.config().name);
            commands.entity(entity).despawn();
        }
    }
}
