//! Boss domain: scripted multi-tick abilities run by the Special state.
//!
//! Every script is a small sub-phase machine advanced by elapsed time, so a
//! preempting phase transition can drop it at any tick.

use bevy::log::{debug, info};
use bevy::math::Vec2;

use crate::boss::combatant::Boss;
use crate::boss::cooldown::AbilityKind;
use crate::boss::selection::AttackDecision;
use crate::boss::state::{BossState, StateUpdate};
use crate::boss::world::{BossWorld, TargetId};

/// Where a scripted ability is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencePhase {
    /// Telegraph is showing, nothing connects yet
    #[default]
    Warning,
    Executing,
    Recovery,
    Done,
}

#[derive(Debug, Clone)]
pub enum SpecialAbility {
    Charge(ChargeRun),
    LaserSweep(LaserRun),
    Summon(SummonRun),
    Earthquake(EarthquakeRun),
}

#[derive(Debug, Clone)]
pub struct ChargeRun {
    pub phase: SequencePhase,
    pub timer: f32,
    /// Locked at launch
    pub direction: Vec2,
    /// Each target is hit at most once per charge
    pub hit: Vec<TargetId>,
}

#[derive(Debug, Clone)]
pub struct LaserRun {
    pub phase: SequencePhase,
    pub timer: f32,
    /// Beam centre line, radians
    pub base_angle: f32,
    pub tick_timer: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SummonRun {
    pub timer: f32,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct EarthquakeRun {
    pub phase: SequencePhase,
    pub timer: f32,
    pub epicenter: Vec2,
}

impl SpecialAbility {
    pub fn kind(&self) -> AbilityKind {
        match self {
            SpecialAbility::Charge(_) => AbilityKind::Charge,
            SpecialAbility::LaserSweep(_) => AbilityKind::LaserSweep,
            SpecialAbility::Summon(_) => AbilityKind::Summon,
            SpecialAbility::Earthquake(_) => AbilityKind::Earthquake,
        }
    }

    pub fn phase(&self) -> SequencePhase {
        match self {
            SpecialAbility::Charge(run) => run.phase,
            SpecialAbility::LaserSweep(run) => run.phase,
            SpecialAbility::Summon(run) if run.done => SequencePhase::Done,
            SpecialAbility::Summon(_) => SequencePhase::Executing,
            SpecialAbility::Earthquake(run) => run.phase,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == SequencePhase::Done
    }
}

/// Move to the next sub-phase once `timer` has covered `duration`.
fn step_phase(
    phase: &mut SequencePhase,
    timer: &mut f32,
    duration: f32,
    next: SequencePhase,
) -> bool {
    if *timer < duration {
        return false;
    }
    *phase = next;
    *timer = 0.0;
    true
}

impl Boss {
    /// Build the run for a cascade decision. Returns `None` for non-special picks.
    pub(crate) fn launch_special(
        &mut self,
        decision: AttackDecision,
        world: &dyn BossWorld,
    ) -> Option<SpecialAbility> {
        if !decision.kind.is_special() || !self.is_ability_available(decision.kind) {
            debug!(
                "{}: cannot launch {:?} as a special ability",
                self.config.name, decision.kind
            );
            return None;
        }

        if let Some(position) = decision
            .target_position
            .or_else(|| self.target_position(world))
        {
            self.face_towards(position);
        }

        let ability = match decision.kind {
            AbilityKind::Charge => SpecialAbility::Charge(ChargeRun {
                phase: SequencePhase::Warning,
                timer: 0.0,
                direction: self.facing,
                hit: Vec::new(),
            }),
            AbilityKind::LaserSweep => SpecialAbility::LaserSweep(LaserRun {
                phase: SequencePhase::Warning,
                timer: 0.0,
                base_angle: self.facing.y.atan2(self.facing.x),
                tick_timer: 0.0,
            }),
            AbilityKind::Summon => SpecialAbility::Summon(SummonRun::default()),
            AbilityKind::Earthquake => SpecialAbility::Earthquake(EarthquakeRun {
                phase: SequencePhase::Warning,
                timer: 0.0,
                epicenter: self.position,
            }),
            AbilityKind::ClawCombo | AbilityKind::Defend | AbilityKind::WeakPointExpose => {
                return None;
            }
        };
        Some(ability)
    }

    /// Enter hook of the Special state: cooldown, signal, telegraph.
    pub(crate) fn begin_special(&mut self) {
        let BossState::Special(ability) = &self.state else {
            return;
        };
        let kind = ability.kind();
        self.use_ability(kind);

        let position = self.position;
        match kind {
            AbilityKind::Charge => {
                let tuning = &self.config.charge;
                self.effects
                    .play_telegraph(kind, position, tuning.hit_radius, tuning.warning_time);
            }
            AbilityKind::LaserSweep => {
                let tuning = &self.config.laser;
                self.effects
                    .play_telegraph(kind, position, tuning.range, tuning.warning_time);
            }
            AbilityKind::Earthquake => {
                let tuning = &self.config.earthquake;
                self.effects
                    .play_telegraph(kind, position, tuning.radius, tuning.warning_time);
            }
            AbilityKind::Summon => {
                let mut count = self.config.summon.count;
                if self.is_enraged {
                    count += self.config.summon.enraged_bonus;
                }
                self.effects.spawn_minions(position, count);
                info!("{} summons {} minions", self.config.name, count);
            }
            _ => {}
        }
    }

    pub(crate) fn update_special(
        &mut self,
        ability: &mut SpecialAbility,
        dt: f32,
        world: &dyn BossWorld,
    ) -> StateUpdate {
        let finished = match ability {
            SpecialAbility::Charge(run) => self.advance_charge(run, dt, world),
            SpecialAbility::LaserSweep(run) => self.advance_laser(run, dt, world),
            SpecialAbility::Summon(run) => {
                run.timer += dt;
                run.done = run.timer >= self.config.summon.duration;
                run.done
            }
            SpecialAbility::Earthquake(run) => self.advance_earthquake(run, dt, world),
        };
        if !finished {
            return StateUpdate::Stay;
        }

        let kind = ability.kind();
        if matches!(kind, AbilityKind::Charge | AbilityKind::Earthquake)
            && self.is_ability_available(AbilityKind::WeakPointExpose)
        {
            self.expose_weak_point();
        }

        StateUpdate::Go(self.next_after_ability(world))
    }

    fn advance_charge(&mut self, run: &mut ChargeRun, dt: f32, world: &dyn BossWorld) -> bool {
        run.timer += dt;
        let tuning = self.config.charge.clone();

        match run.phase {
            SequencePhase::Warning => {
                if step_phase(
                    &mut run.phase,
                    &mut run.timer,
                    tuning.warning_time,
                    SequencePhase::Executing,
                ) {
                    self.effects.stop_telegraph(AbilityKind::Charge);
                }
            }
            SequencePhase::Executing => {
                let step = tuning.speed * self.modifiers.move_speed * dt;
                let next = self.position + run.direction * step;
                if world.is_obstructed(self.position, next) {
                    debug!("{}: charge stopped by an obstruction", self.config.name);
                    run.phase = SequencePhase::Recovery;
                    run.timer = 0.0;
                    return false;
                }
                self.position = next;

                let damage = self.scaled_damage() * tuning.damage_multiplier;
                for (target, _) in world.overlap_targets(self.position, tuning.hit_radius) {
                    if run.hit.contains(&target) {
                        continue;
                    }
                    run.hit.push(target);
                    self.hit_target(target, damage, AbilityKind::Charge);
                }

                step_phase(
                    &mut run.phase,
                    &mut run.timer,
                    tuning.duration,
                    SequencePhase::Recovery,
                );
            }
            SequencePhase::Recovery => {
                step_phase(
                    &mut run.phase,
                    &mut run.timer,
                    tuning.recovery,
                    SequencePhase::Done,
                );
            }
            SequencePhase::Done => {}
        }

        run.phase == SequencePhase::Done
    }

    fn advance_laser(&mut self, run: &mut LaserRun, dt: f32, world: &dyn BossWorld) -> bool {
        run.timer += dt;
        let tuning = self.config.laser.clone();

        match run.phase {
            SequencePhase::Warning => {
                if step_phase(
                    &mut run.phase,
                    &mut run.timer,
                    tuning.warning_time,
                    SequencePhase::Executing,
                ) {
                    self.effects.stop_telegraph(AbilityKind::LaserSweep);
                    run.tick_timer = 0.0;
                }
            }
            SequencePhase::Executing => {
                let progress = (run.timer / tuning.duration).clamp(0.0, 1.0);
                let sweep = tuning.sweep_angle.to_radians();
                let angle = run.base_angle - sweep / 2.0 + sweep * progress;
                self.facing = Vec2::from_angle(angle);

                run.tick_timer += dt;
                while run.tick_timer >= tuning.tick_interval {
                    run.tick_timer -= tuning.tick_interval;
                    self.fire_beam(&tuning, world);
                }

                step_phase(
                    &mut run.phase,
                    &mut run.timer,
                    tuning.duration,
                    SequencePhase::Recovery,
                );
            }
            SequencePhase::Recovery => {
                step_phase(
                    &mut run.phase,
                    &mut run.timer,
                    tuning.recovery,
                    SequencePhase::Done,
                );
            }
            SequencePhase::Done => {}
        }

        run.phase == SequencePhase::Done
    }

    fn advance_earthquake(
        &mut self,
        run: &mut EarthquakeRun,
        dt: f32,
        world: &dyn BossWorld,
    ) -> bool {
        run.timer += dt;
        let tuning = self.config.earthquake.clone();

        match run.phase {
            SequencePhase::Warning => {
                if run.timer >= tuning.warning_time {
                    self.effects.stop_telegraph(AbilityKind::Earthquake);
                    run.phase = SequencePhase::Executing;
                }
            }
            SequencePhase::Executing => {}
            SequencePhase::Recovery => {
                step_phase(
                    &mut run.phase,
                    &mut run.timer,
                    tuning.recovery,
                    SequencePhase::Done,
                );
            }
            SequencePhase::Done => {}
        }

        // Impact resolves on the tick the warning ends
        if run.phase == SequencePhase::Executing {
            self.effects
                .screen_shake(tuning.shake_intensity, tuning.shake_duration);
            let damage = self.scaled_damage() * tuning.damage_multiplier;
            for (target, _) in world.overlap_targets(run.epicenter, tuning.radius) {
                self.hit_target(target, damage, AbilityKind::Earthquake);
            }
            run.phase = SequencePhase::Recovery;
            run.timer = 0.0;
        }

        run.phase == SequencePhase::Done
    }
}
