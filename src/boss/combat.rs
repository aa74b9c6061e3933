//! Boss domain: damage resolution in both directions.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use rand::Rng;

use crate::boss::combatant::Boss;
use crate::boss::config::LaserTuning;
use crate::boss::cooldown::AbilityKind;
use crate::boss::events::BossSignal;
use crate::boss::state::{BossState, DeadState};
use crate::boss::world::{BossWorld, TargetId};

/// Unsigned angle between two vectors in radians, `PI` if either is zero.
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let (a, b) = (a.normalize_or_zero(), b.normalize_or_zero());
    if a == Vec2::ZERO || b == Vec2::ZERO {
        return std::f32::consts::PI;
    }
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// True when `attacker_position` sits inside the rear cone of `weak_point_angle` degrees.
pub fn is_weak_point_hit(
    boss_position: Vec2,
    facing: Vec2,
    attacker_position: Vec2,
    weak_point_angle: f32,
) -> bool {
    let to_attacker = attacker_position - boss_position;
    if to_attacker.length_squared() <= f32::EPSILON {
        return false;
    }
    angle_between(-facing, to_attacker) <= (weak_point_angle / 2.0).to_radians()
}

/// True when `point` lies within `half_angle` radians of `facing` as seen from `origin`.
pub fn within_cone(origin: Vec2, facing: Vec2, point: Vec2, half_angle: f32) -> bool {
    let offset = point - origin;
    if offset.length_squared() <= f32::EPSILON {
        return true;
    }
    angle_between(facing, offset) <= half_angle
}

impl Boss {
    /// Apply incoming damage and return what was actually removed from health.
    ///
    /// Dead or invincible bosses absorb everything. A rear hit while the weak
    /// point is exposed is multiplied, then the defend stance reduces it.
    pub fn take_damage(&mut self, amount: f32, attacker_position: Vec2) -> f32 {
        if self.is_dead || self.is_invincible() || !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }

        let mut damage = amount;
        if self.is_weak_point_exposed()
            && is_weak_point_hit(
                self.position,
                self.facing,
                attacker_position,
                self.config.weak_point.angle,
            )
        {
            damage *= self.config.weak_point.damage_multiplier;
            debug!("{}: weak point hit for {}", self.config.name, damage);
        }
        if self.is_defending {
            damage *= 1.0 - self.config.defend.damage_reduction;
        }

        let before = self.health;
        self.health = (self.health - damage).max(0.0);
        let applied = before - self.health;

        self.signals.push(BossSignal::TakeDamage(applied));
        self.push_health();

        if self.health <= 0.0 {
            self.enter_dead();
            return applied;
        }

        let fraction = self.health_fraction();
        if let Some(change) = self.phase_model.update_phase(fraction) {
            self.begin_phase_transition(change);
            return applied;
        }

        if self.is_defending && self.rng.random::<f32>() < self.config.defend.break_chance {
            self.break_defend();
        }

        applied
    }

    /// Restore health without touching phase or enrage.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.is_dead || !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.config.max_health);
        let healed = self.health - before;
        if healed > 0.0 {
            self.push_health();
        }
        healed
    }

    /// Debug hook: kill immediately, bypassing invincibility.
    pub fn force_kill(&mut self) {
        if self.is_dead {
            return;
        }
        self.health = 0.0;
        self.push_health();
        self.enter_dead();
    }

    pub(crate) fn enter_dead(&mut self) {
        if self.is_dead {
            return;
        }
        if let Some(transition) = self.transition.take() {
            debug!(
                "{}: abandoning transition to {:?}",
                self.config.name, transition.phase
            );
        }

        self.is_dead = true;
        self.stun_remaining = 0.0;
        self.weak_point_remaining = 0.0;
        self.phase_model.defeat();
        self.replace_state(BossState::Dead(DeadState {
            fade_remaining: self.config.death_fade_duration,
        }));
        self.signals.push(BossSignal::Defeated);

        info!("{} defeated", self.config.name);
    }

    /// Death fade; `Despawned` is emitted once when it completes.
    pub(crate) fn update_dead(&mut self, dt: f32) {
        let BossState::Dead(dead) = &mut self.state else {
            return;
        };
        dead.fade_remaining = (dead.fade_remaining - dt).max(0.0);
        if dead.fade_remaining <= 0.0 && !self.despawned {
            self.despawned = true;
            self.signals.push(BossSignal::Despawned);
        }
    }

    fn break_defend(&mut self) {
        self.stun_remaining = self.config.defend.break_stun;
        self.signals.push(BossSignal::DefendBroken);
        self.replace_state(BossState::Idle);
        info!("{} defend broken", self.config.name);
    }

    pub(crate) fn expose_weak_point(&mut self) {
        self.cooldowns
            .mark_used(AbilityKind::WeakPointExpose, self.clock);
        self.weak_point_remaining = self.config.weak_point.duration;
        self.signals.push(BossSignal::WeakPointExposed);
        info!(
            "{} weak point exposed for {}s",
            self.config.name, self.config.weak_point.duration
        );
    }

    /// Base attack damage with the current phase multiplier
    pub(crate) fn scaled_damage(&self) -> f32 {
        self.config.attack_damage * self.modifiers.attack_damage
    }

    pub(crate) fn hit_target(&mut self, target: TargetId, damage: f32, source: AbilityKind) {
        self.signals.push(BossSignal::TargetHit {
            target,
            damage,
            source,
        });
    }

    /// One claw strike of the combo. Later strikes hit harder.
    pub(crate) fn perform_claw_hit(&mut self, hit_index: u32, world: &dyn BossWorld) {
        let combo = &self.config.combo;
        let damage = self.scaled_damage() * (1.0 + hit_index as f32 * combo.damage_step);
        let half_cone = (combo.cone_angle / 2.0).to_radians();

        let mut landed = false;
        for (target, position) in world.overlap_targets(self.position, self.config.attack_range) {
            if within_cone(self.position, self.facing, position, half_cone) {
                self.hit_target(target, damage, AbilityKind::ClawCombo);
                landed = true;
            }
        }

        if landed {
            self.current_combo += 1;
            self.since_last_hit = 0.0;
        }
    }

    /// One laser tick along the current facing.
    pub(crate) fn fire_beam(&mut self, tuning: &LaserTuning, world: &dyn BossWorld) {
        let damage = tuning.damage_per_tick * self.modifiers.attack_damage;
        let half_width = tuning.beam_half_width.to_radians();
        for (target, position) in world.overlap_targets(self.position, tuning.range) {
            if within_cone(self.position, self.facing, position, half_width) {
                self.hit_target(target, damage, AbilityKind::LaserSweep);
            }
        }
    }

    fn push_health(&mut self) {
        self.signals.push(BossSignal::HealthChanged {
            current: self.health,
            max: self.config.max_health,
        });
    }
}
