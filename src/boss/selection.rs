//! Boss domain: cascaded attack selection.
//!
//! Later-phase abilities get first refusal. Each rule is a guard followed by
//! its own uniform draw; the first rule whose draw succeeds wins, and a rule
//! whose guard fails consumes no draw. When nothing fires the boss falls
//! back to its claw combo.

use bevy::math::Vec2;
use rand::Rng;

use crate::boss::config::SelectionTuning;
use crate::boss::cooldown::AbilityKind;
use crate::boss::phase::Phase;

/// Set of abilities currently off cooldown and unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability([bool; AbilityKind::COUNT]);

impl Availability {
    pub fn all() -> Self {
        Self([true; AbilityKind::COUNT])
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, kind: AbilityKind) -> bool {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: AbilityKind, available: bool) {
        self.0[kind.index()] = available;
    }

    pub fn without(mut self, kind: AbilityKind) -> Self {
        self.set(kind, false);
        self
    }
}

impl FromIterator<AbilityKind> for Availability {
    fn from_iter<I: IntoIterator<Item = AbilityKind>>(iter: I) -> Self {
        let mut availability = Self::none();
        for kind in iter {
            availability.set(kind, true);
        }
        availability
    }
}

/// Inputs the cascade decides on.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext {
    pub phase: Phase,
    pub distance: f32,
    pub health_fraction: f32,
    pub availability: Availability,
    pub target_position: Option<Vec2>,
}

/// The cascade's pick, consumed immediately by the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackDecision {
    pub kind: AbilityKind,
    pub target_position: Option<Vec2>,
}

pub fn select_attack<R: Rng + ?Sized>(
    ctx: &SelectionContext,
    tuning: &SelectionTuning,
    rng: &mut R,
) -> AttackDecision {
    AttackDecision {
        kind: cascade(ctx, tuning, rng),
        target_position: ctx.target_position,
    }
}

fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    rng.random::<f32>() < chance
}

fn cascade<R: Rng + ?Sized>(
    ctx: &SelectionContext,
    tuning: &SelectionTuning,
    rng: &mut R,
) -> AbilityKind {
    let available = |kind| ctx.availability.contains(kind);

    if ctx.phase == Phase::Phase3
        && available(AbilityKind::Earthquake)
        && roll(rng, tuning.earthquake_chance)
    {
        return AbilityKind::Earthquake;
    }

    if ctx.phase >= Phase::Phase2
        && ctx.distance > tuning.laser_min_distance
        && available(AbilityKind::LaserSweep)
        && roll(rng, tuning.laser_chance)
    {
        return AbilityKind::LaserSweep;
    }

    if ctx.phase >= Phase::Phase2
        && available(AbilityKind::Summon)
        && roll(rng, tuning.summon_chance)
    {
        return AbilityKind::Summon;
    }

    if ctx.distance > tuning.charge_min_distance
        && available(AbilityKind::Charge)
        && roll(rng, tuning.charge_chance)
    {
        return AbilityKind::Charge;
    }

    if available(AbilityKind::Defend)
        && ctx.health_fraction < tuning.defend_health_below
        && roll(rng, tuning.defend_chance)
    {
        return AbilityKind::Defend;
    }

    AbilityKind::ClawCombo
}
