//! Diver domain: the player-controlled mech that fights the boss.

#[cfg(test)]
mod tests;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::arena::{
    ArenaLayer, ArenaState, BossEncounter, BossHitTargetEvent, BossTarget, DamageBossEvent,
};

/// World units to screen pixels
const PIXELS_PER_UNIT: f32 = 32.0;

#[derive(Component, Debug)]
pub struct Diver {
    pub health: f32,
    pub max_health: f32,
    pub attack_timer: f32,
}

impl Diver {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            attack_timer: 0.0,
        }
    }

    pub fn is_down(&self) -> bool {
        self.health <= 0.0
    }

    pub fn take_hit(&mut self, damage: f32) {
        self.health = (self.health - damage).max(0.0);
    }
}

#[derive(Resource, Debug, Clone)]
pub struct DiverTuning {
    pub max_health: f32,
    pub swim_speed: f32,
    pub strike_damage: f32,
    pub strike_range: f32,
    pub strike_cooldown: f32,
    pub spawn: Vec2,
}

impl Default for DiverTuning {
    fn default() -> Self {
        Self {
            max_health: 1000.0,
            swim_speed: 6.0,
            strike_damage: 120.0,
            strike_range: 3.5,
            strike_cooldown: 0.4,
            spawn: Vec2::new(-8.0, 0.0),
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct DiverInput {
    pub axis: Vec2,
    pub strike_pressed: bool,
}

#[derive(Component, Debug)]
pub struct ArenaCamera;

pub struct DiverPlugin;

impl Plugin for DiverPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DiverTuning>()
            .init_resource::<DiverInput>()
            .add_systems(Startup, (setup_camera, spawn_diver))
            .add_systems(
                Update,
                (
                    read_input,
                    swim,
                    strike_boss,
                    apply_boss_hits,
                    shake_camera,
                )
                    .chain(),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        ArenaCamera,
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

fn spawn_diver(mut commands: Commands, tuning: Res<DiverTuning>) {
    commands.spawn((
        Diver::new(tuning.max_health),
        BossTarget,
        Name::new("Diver"),
        Sprite {
            color: Color::srgb(0.9, 0.8, 0.2),
            custom_size: Some(Vec2::new(1.0, 1.6)),
            ..default()
        },
        Transform::from_translation(tuning.spawn.extend(1.0)),
        RigidBody::Dynamic,
        Collider::rectangle(1.0, 1.6),
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        GravityScale(0.0), // Neutral buoyancy
        LinearDamping(4.0),
        CollisionLayers::new(
            ArenaLayer::Target,
            [ArenaLayer::Wall, ArenaLayer::Boss, ArenaLayer::Minion],
        ),
    ));
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<DiverInput>) {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }

    input.axis = axis.normalize_or_zero();
    input.strike_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyJ);
}

pub(crate) fn swim(
    input: Res<DiverInput>,
    tuning: Res<DiverTuning>,
    mut divers: Query<(&Diver, &mut LinearVelocity)>,
) {
    for (diver, mut velocity) in &mut divers {
        if diver.is_down() {
            velocity.0 = Vec2::ZERO;
            continue;
        }
        velocity.0 = input.axis * tuning.swim_speed;
    }
}

/// Strike every boss within reach.
pub(crate) fn strike_boss(
    time: Res<Time>,
    input: Res<DiverInput>,
    tuning: Res<DiverTuning>,
    mut divers: Query<(&mut Diver, &Transform)>,
    bosses: Query<(Entity, &Transform), With<BossEncounter>>,
    mut damage: MessageWriter<DamageBossEvent>,
) {
    for (mut diver, transform) in &mut divers {
        diver.attack_timer = (diver.attack_timer - time.delta_secs()).max(0.0);
        if !input.strike_pressed || diver.attack_timer > 0.0 || diver.is_down() {
            continue;
        }
        diver.attack_timer = tuning.strike_cooldown;

        let position = transform.translation.truncate();
        for (boss, boss_transform) in &bosses {
            if boss_transform.translation.truncate().distance(position) <= tuning.strike_range {
                damage.write(DamageBossEvent {
                    boss,
                    amount: tuning.strike_damage,
                    attacker_position: position,
                });
            }
        }
    }
}

/// Apply boss hits. A downed diver stops being something the boss can hunt.
pub(crate) fn apply_boss_hits(
    mut commands: Commands,
    mut hits: MessageReader<BossHitTargetEvent>,
    mut divers: Query<&mut Diver>,
) {
    for hit in hits.read() {
        let Ok(mut diver) = divers.get_mut(hit.target) else {
            continue;
        };
        if diver.is_down() {
            continue;
        }
        diver.take_hit(hit.damage);
        debug!(
            "Diver took {} from {:?} ({} left)",
            hit.damage, hit.source, diver.health
        );
        if diver.is_down() {
            info!("Diver is down");
            commands.entity(hit.target).remove::<BossTarget>();
        }
    }
}

fn shake_camera(
    time: Res<Time>,
    state: Res<ArenaState>,
    mut cameras: Query<&mut Transform, With<ArenaCamera>>,
) {
    let offset = match state.shake {
        Some(shake) => {
            let t = time.elapsed_secs() * 40.0;
            Vec2::new(t.sin(), (t * 1.3).cos()) * shake.intensity * 0.3
        }
        None => Vec2::ZERO,
    };
    for mut transform in &mut cameras {
        transform.translation.x = offset.x;
        transform.translation.y = offset.y;
    }
}
