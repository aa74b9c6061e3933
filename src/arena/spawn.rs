//! Arena domain: boss and arena geometry spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::arena::components::{ArenaWall, BossEncounter};
use crate::arena::resources::ArenaSettings;
use crate::arena::world::{ArenaLayer, QueuedEffects};
use crate::boss::{Boss, BossConfig, BossSetupError};
use crate::content::BossTuning;

/// Spawn a boss encounter. Fails without spawning anything if `config` is invalid.
pub fn spawn_boss(
    commands: &mut Commands,
    config: BossConfig,
    settings: &ArenaSettings,
) -> Result<Entity, BossSetupError> {
    let effects = QueuedEffects::default();
    let name = config.name.clone();
    let boss = Boss::with_seed(
        config,
        settings.boss_spawn,
        Box::new(effects.clone()),
        settings.seed,
    )?;

    let entity = commands
        .spawn((
            BossEncounter { boss, effects },
            Name::new(name),
            Sprite {
                color: Color::srgb(0.45, 0.5, 0.55),
                custom_size: Some(Vec2::splat(3.0)),
                ..default()
            },
            Transform::from_translation(settings.boss_spawn.extend(0.5)),
            RigidBody::Kinematic,
            Collider::circle(1.5),
            CollisionLayers::new(ArenaLayer::Boss, [ArenaLayer::Target]),
        ))
        .id();
    Ok(entity)
}

/// Four static walls around the arena
pub fn spawn_arena_walls(commands: &mut Commands, settings: &ArenaSettings) {
    let half = settings.half_extents;
    let thickness = settings.wall_thickness;
    let wall_layers = CollisionLayers::new(
        ArenaLayer::Wall,
        [ArenaLayer::Boss, ArenaLayer::Target, ArenaLayer::Minion],
    );

    let walls = [
        (Vec2::new(0.0, half.y), Vec2::new(half.x * 2.0 + thickness, thickness)),
        (Vec2::new(0.0, -half.y), Vec2::new(half.x * 2.0 + thickness, thickness)),
        (Vec2::new(half.x, 0.0), Vec2::new(thickness, half.y * 2.0 + thickness)),
        (Vec2::new(-half.x, 0.0), Vec2::new(thickness, half.y * 2.0 + thickness)),
    ];

    for (position, size) in walls {
        commands.spawn((
            ArenaWall,
            Sprite {
                color: Color::srgb(0.15, 0.2, 0.3),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    }
}

pub(crate) fn setup_boss_arena(
    mut commands: Commands,
    tuning: Res<BossTuning>,
    settings: Res<ArenaSettings>,
) {
    spawn_arena_walls(&mut commands, &settings);

    match spawn_boss(&mut commands, tuning.0.clone(), &settings) {
        Ok(entity) => info!("Boss encounter ready: {:?}", entity),
        Err(e) => error!("Boss encounter not started: {}", e),
    }
}
