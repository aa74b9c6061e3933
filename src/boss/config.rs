//! Boss domain: encounter tuning and setup-time validation.
//!
//! Every tunable of the Iron Claw Beast lives here. Defaults mirror the
//! shipped encounter; `assets/data/iron_claw_beast.ron` may override any
//! subset of them.

use serde::{Deserialize, Serialize};

use crate::boss::cooldown::AbilityKind;
use crate::boss::phase::{Phase, PhaseThresholds};

/// Helper macro for recording a failed invariant
macro_rules! check {
    ($errors:expr, $cond:expr, $field:expr, $($fmt:tt)+) => {
        if !$cond {
            $errors.push(ConfigError {
                field: $field,
                message: format!($($fmt)+),
            });
        }
    };
}

/// Attribute multipliers applied when a phase transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhaseModifiers {
    pub move_speed: f32,
    pub attack_damage: f32,
    /// Divides combo hit intervals
    pub attack_speed: f32,
}

impl Default for PhaseModifiers {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            attack_damage: 1.0,
            attack_speed: 1.0,
        }
    }
}

/// Fixed cooldown per ability, in seconds. Phase independent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CooldownTable {
    pub claw_combo: f32,
    pub charge: f32,
    pub defend: f32,
    pub laser_sweep: f32,
    pub summon: f32,
    pub earthquake: f32,
    pub weak_point_expose: f32,
}

impl Default for CooldownTable {
    fn default() -> Self {
        Self {
            claw_combo: 2.0,
            charge: 8.0,
            defend: 12.0,
            laser_sweep: 10.0,
            summon: 20.0,
            earthquake: 15.0,
            weak_point_expose: 25.0,
        }
    }
}

impl CooldownTable {
    pub fn get(&self, kind: AbilityKind) -> f32 {
        match kind {
            AbilityKind::ClawCombo => self.claw_combo,
            AbilityKind::Charge => self.charge,
            AbilityKind::Defend => self.defend,
            AbilityKind::LaserSweep => self.laser_sweep,
            AbilityKind::Summon => self.summon,
            AbilityKind::Earthquake => self.earthquake,
            AbilityKind::WeakPointExpose => self.weak_point_expose,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ComboTuning {
    pub hits: u32,
    pub hit_interval: f32,
    /// Extra damage per successive hit (0.2 = +20%)
    pub damage_step: f32,
    /// Full width of the frontal cone, in degrees
    pub cone_angle: f32,
    /// Landed-hit counter resets after this long without a hit
    pub reset_time: f32,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            hits: 3,
            hit_interval: 0.5,
            damage_step: 0.2,
            cone_angle: 90.0,
            reset_time: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefendTuning {
    pub duration: f32,
    pub damage_reduction: f32,
    /// Chance per damaging hit to break the stance
    pub break_chance: f32,
    /// Invincibility window after a break
    pub break_stun: f32,
}

impl Default for DefendTuning {
    fn default() -> Self {
        Self {
            duration: 3.0,
            damage_reduction: 0.5,
            break_chance: 0.1,
            break_stun: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeakPointTuning {
    /// Full width of the rear cone, in degrees
    pub angle: f32,
    pub damage_multiplier: f32,
    pub duration: f32,
}

impl Default for WeakPointTuning {
    fn default() -> Self {
        Self {
            angle: 45.0,
            damage_multiplier: 3.0,
            duration: 5.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChargeTuning {
    pub warning_time: f32,
    pub speed: f32,
    pub duration: f32,
    pub hit_radius: f32,
    pub damage_multiplier: f32,
    pub recovery: f32,
}

impl Default for ChargeTuning {
    fn default() -> Self {
        Self {
            warning_time: 1.0,
            speed: 15.0,
            duration: 1.0,
            hit_radius: 2.0,
            damage_multiplier: 1.5,
            recovery: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LaserTuning {
    pub warning_time: f32,
    pub duration: f32,
    /// Total arc swept by the beam, in degrees
    pub sweep_angle: f32,
    pub range: f32,
    /// Angular half width of the beam, in degrees
    pub beam_half_width: f32,
    pub tick_interval: f32,
    pub damage_per_tick: f32,
    pub recovery: f32,
}

impl Default for LaserTuning {
    fn default() -> Self {
        Self {
            warning_time: 1.5,
            duration: 3.0,
            sweep_angle: 120.0,
            range: 20.0,
            beam_half_width: 5.0,
            tick_interval: 0.25,
            damage_per_tick: 10.0,
            recovery: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SummonTuning {
    pub count: u32,
    /// Extra minions once enraged
    pub enraged_bonus: u32,
    pub duration: f32,
}

impl Default for SummonTuning {
    fn default() -> Self {
        Self {
            count: 3,
            enraged_bonus: 2,
            duration: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EarthquakeTuning {
    pub warning_time: f32,
    pub radius: f32,
    pub damage_multiplier: f32,
    pub shake_intensity: f32,
    pub shake_duration: f32,
    pub recovery: f32,
}

impl Default for EarthquakeTuning {
    fn default() -> Self {
        Self {
            warning_time: 2.0,
            radius: 10.0,
            damage_multiplier: 2.0,
            shake_intensity: 0.8,
            shake_duration: 1.0,
            recovery: 1.0,
        }
    }
}

/// Chances and distance gates of the attack selection cascade.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionTuning {
    pub earthquake_chance: f32,
    pub laser_chance: f32,
    pub laser_min_distance: f32,
    pub summon_chance: f32,
    pub charge_chance: f32,
    pub charge_min_distance: f32,
    pub defend_chance: f32,
    /// Defend is only considered below this health fraction
    pub defend_health_below: f32,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            earthquake_chance: 0.3,
            laser_chance: 0.4,
            laser_min_distance: 8.0,
            summon_chance: 0.2,
            charge_chance: 0.3,
            charge_min_distance: 5.0,
            defend_chance: 0.15,
            defend_health_below: 0.5,
        }
    }
}

/// Complete boss configuration, passed to [`crate::boss::Boss::new`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BossConfig {
    pub name: String,
    pub max_health: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    pub detection_range: f32,
    pub attack_damage: f32,
    /// How often the chase state consults the selection cascade
    pub decision_interval: f32,
    /// Chase gives up after the target has been missing this long
    pub lose_target_time: f32,
    pub thresholds: PhaseThresholds,
    pub phase2: PhaseModifiers,
    pub phase3: PhaseModifiers,
    pub phase_transition_duration: f32,
    pub phase_transition_invincible_time: f32,
    pub death_fade_duration: f32,
    pub cooldowns: CooldownTable,
    pub combo: ComboTuning,
    pub defend: DefendTuning,
    pub weak_point: WeakPointTuning,
    pub charge: ChargeTuning,
    pub laser: LaserTuning,
    pub summon: SummonTuning,
    pub earthquake: EarthquakeTuning,
    pub selection: SelectionTuning,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            name: "Iron Claw Beast".to_string(),
            max_health: 5000.0,
            move_speed: 3.0,
            attack_range: 4.0,
            detection_range: 15.0,
            attack_damage: 50.0,
            decision_interval: 0.5,
            lose_target_time: 5.0,
            thresholds: PhaseThresholds::default(),
            phase2: PhaseModifiers {
                move_speed: 1.2,
                attack_damage: 1.3,
                attack_speed: 1.2,
            },
            phase3: PhaseModifiers {
                move_speed: 1.5,
                attack_damage: 1.6,
                attack_speed: 1.5,
            },
            phase_transition_duration: 3.0,
            phase_transition_invincible_time: 5.0,
            death_fade_duration: 2.0,
            cooldowns: CooldownTable::default(),
            combo: ComboTuning::default(),
            defend: DefendTuning::default(),
            weak_point: WeakPointTuning::default(),
            charge: ChargeTuning::default(),
            laser: LaserTuning::default(),
            summon: SummonTuning::default(),
            earthquake: EarthquakeTuning::default(),
            selection: SelectionTuning::default(),
        }
    }
}

impl BossConfig {
    /// Multipliers in effect once `phase` has been fully entered.
    pub fn modifiers_for(&self, phase: Phase) -> PhaseModifiers {
        match phase {
            Phase::Phase1 => PhaseModifiers::default(),
            Phase::Phase2 => self.phase2,
            Phase::Phase3 | Phase::Defeated => self.phase3,
        }
    }

    /// Check every invariant the encounter depends on.
    /// Returns a list of errors, empty if the configuration is usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check!(
            errors,
            self.max_health.is_finite() && self.max_health > 0.0,
            "max_health",
            "must be a positive number, got {}",
            self.max_health
        );
        check!(
            errors,
            self.thresholds.phase3_at > 0.0
                && self.thresholds.phase3_at < self.thresholds.phase2_at
                && self.thresholds.phase2_at < 1.0,
            "thresholds",
            "expected 0 < phase3_at < phase2_at < 1, got phase2_at={} phase3_at={}",
            self.thresholds.phase2_at,
            self.thresholds.phase3_at
        );
        check!(
            errors,
            self.phase_transition_duration >= 0.0
                && self.phase_transition_invincible_time.is_finite()
                && self.phase_transition_invincible_time >= self.phase_transition_duration,
            "phase_transition_invincible_time",
            "must be at least phase_transition_duration ({} < {})",
            self.phase_transition_invincible_time,
            self.phase_transition_duration
        );
        check!(
            errors,
            self.attack_range > 0.0,
            "attack_range",
            "must be positive, got {}",
            self.attack_range
        );
        check!(
            errors,
            self.decision_interval > 0.0,
            "decision_interval",
            "must be positive, got {}",
            self.decision_interval
        );
        for (field, modifiers) in [("phase2", &self.phase2), ("phase3", &self.phase3)] {
            check!(
                errors,
                [
                    modifiers.move_speed,
                    modifiers.attack_damage,
                    modifiers.attack_speed
                ]
                .iter()
                .all(|m| m.is_finite() && *m > 0.0),
                field,
                "multipliers must be positive, got {:?}",
                modifiers
            );
        }
        for (field, value) in self.non_negative_fields() {
            check!(
                errors,
                value.is_finite() && value >= 0.0,
                field,
                "must be a non-negative number, got {}",
                value
            );
        }
        for (field, angle) in [
            ("combo.cone_angle", self.combo.cone_angle),
            ("weak_point.angle", self.weak_point.angle),
        ] {
            check!(
                errors,
                (0.0..=360.0).contains(&angle),
                field,
                "must be within [0, 360] degrees, got {}",
                angle
            );
        }
        for kind in AbilityKind::ALL {
            let cooldown = self.cooldowns.get(kind);
            check!(
                errors,
                cooldown.is_finite() && cooldown >= 0.0,
                "cooldowns",
                "{:?} cooldown must be non-negative, got {}",
                kind,
                cooldown
            );
        }
        check!(
            errors,
            self.combo.hits > 0 && self.combo.hit_interval > 0.0,
            "combo",
            "needs at least one hit and a positive interval"
        );
        check!(
            errors,
            (0.0..=1.0).contains(&self.defend.damage_reduction),
            "defend.damage_reduction",
            "must be within [0, 1], got {}",
            self.defend.damage_reduction
        );
        check!(
            errors,
            (0.0..=1.0).contains(&self.defend.break_chance),
            "defend.break_chance",
            "must be within [0, 1], got {}",
            self.defend.break_chance
        );
        // Divisors
        for (field, value) in [
            ("laser.tick_interval", self.laser.tick_interval),
            ("laser.duration", self.laser.duration),
        ] {
            check!(
                errors,
                value.is_finite() && value > 0.0,
                field,
                "must be positive, got {}",
                value
            );
        }
        let chances = [
            self.selection.earthquake_chance,
            self.selection.laser_chance,
            self.selection.summon_chance,
            self.selection.charge_chance,
            self.selection.defend_chance,
        ];
        check!(
            errors,
            chances.iter().all(|c| (0.0..=1.0).contains(c)),
            "selection",
            "chances must be within [0, 1], got {:?}",
            chances
        );

        check!(
            errors,
            (0.0..=1.0).contains(&self.selection.defend_health_below),
            "selection.defend_health_below",
            "must be within [0, 1], got {}",
            self.selection.defend_health_below
        );

        errors
    }

    fn non_negative_fields(&self) -> [(&'static str, f32); 30] {
        [
            ("move_speed", self.move_speed),
            ("detection_range", self.detection_range),
            ("attack_damage", self.attack_damage),
            ("lose_target_time", self.lose_target_time),
            ("death_fade_duration", self.death_fade_duration),
            ("combo.damage_step", self.combo.damage_step),
            ("combo.reset_time", self.combo.reset_time),
            ("defend.duration", self.defend.duration),
            ("defend.break_stun", self.defend.break_stun),
            ("weak_point.damage_multiplier", self.weak_point.damage_multiplier),
            ("weak_point.duration", self.weak_point.duration),
            ("charge.warning_time", self.charge.warning_time),
            ("charge.speed", self.charge.speed),
            ("charge.duration", self.charge.duration),
            ("charge.hit_radius", self.charge.hit_radius),
            ("charge.damage_multiplier", self.charge.damage_multiplier),
            ("charge.recovery", self.charge.recovery),
            ("laser.warning_time", self.laser.warning_time),
            ("laser.sweep_angle", self.laser.sweep_angle),
            ("laser.range", self.laser.range),
            ("laser.beam_half_width", self.laser.beam_half_width),
            ("laser.damage_per_tick", self.laser.damage_per_tick),
            ("laser.recovery", self.laser.recovery),
            ("summon.duration", self.summon.duration),
            ("earthquake.warning_time", self.earthquake.warning_time),
            ("earthquake.radius", self.earthquake.radius),
            ("earthquake.damage_multiplier", self.earthquake.damage_multiplier),
            ("earthquake.shake_intensity", self.earthquake.shake_intensity),
            ("earthquake.shake_duration", self.earthquake.shake_duration),
            ("earthquake.recovery", self.earthquake.recovery),
        ]
    }
}

/// A configuration value that would break an encounter invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid boss config field '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}
