//! Boss domain: the enum-dispatched state machine.
//!
//! Each state carries its own timers. Updates run with the state moved out of
//! the boss and report whether to stay or where to go; transitions are then
//! applied through one guarded entry point.

use bevy::log::debug;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::boss::abilities::SpecialAbility;
use crate::boss::combatant::Boss;
use crate::boss::cooldown::AbilityKind;
use crate::boss::events::BossSignal;
use crate::boss::selection::{self, AttackDecision};
use crate::boss::world::BossWorld;

/// Data-free view of [`BossState`], for signals and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BossStateKind {
    Idle,
    Chase,
    Attack,
    Defend,
    Special,
    Dead,
}

#[derive(Debug, Clone)]
pub enum BossState {
    Idle,
    Chase(ChaseState),
    Attack(AttackState),
    Defend(DefendState),
    Special(SpecialAbility),
    Dead(DeadState),
}

#[derive(Debug, Clone, Default)]
pub struct ChaseState {
    /// Time since the cascade was last consulted
    pub decision_timer: f32,
    /// Time the target has been missing
    pub lost_timer: f32,
}

#[derive(Debug, Clone, Default)]
pub struct AttackState {
    /// `None` between combos while waiting on the cooldown
    pub combo: Option<ComboSequence>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ComboSequence {
    pub hits_done: u32,
    /// Counts down to the next hit
    pub hit_timer: f32,
}

#[derive(Debug, Clone)]
pub struct DefendState {
    pub remaining: f32,
    /// State to return to once the stance ends on its own
    pub resume: BossStateKind,
}

#[derive(Debug, Clone)]
pub struct DeadState {
    pub fade_remaining: f32,
}

impl BossState {
    pub fn chase() -> Self {
        BossState::Chase(ChaseState::default())
    }

    pub fn kind(&self) -> BossStateKind {
        match self {
            BossState::Idle => BossStateKind::Idle,
            BossState::Chase(_) => BossStateKind::Chase,
            BossState::Attack(_) => BossStateKind::Attack,
            BossState::Defend(_) => BossStateKind::Defend,
            BossState::Special(_) => BossStateKind::Special,
            BossState::Dead(_) => BossStateKind::Dead,
        }
    }

    /// The ability sequence currently executing, if any. One at most by construction.
    pub fn active_ability(&self) -> Option<AbilityKind> {
        match self {
            BossState::Attack(AttackState { combo: Some(_) }) => Some(AbilityKind::ClawCombo),
            BossState::Defend(_) => Some(AbilityKind::Defend),
            BossState::Special(ability) => Some(ability.kind()),
            _ => None,
        }
    }
}

/// Requested destination of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Next {
    Idle,
    Chase,
    Attack,
    Defend,
    Special(AttackDecision),
}

impl Next {
    fn kind(&self) -> BossStateKind {
        match self {
            Next::Idle => BossStateKind::Idle,
            Next::Chase => BossStateKind::Chase,
            Next::Attack => BossStateKind::Attack,
            Next::Defend => BossStateKind::Defend,
            Next::Special(_) => BossStateKind::Special,
        }
    }
}

pub(crate) enum StateUpdate {
    Stay,
    Go(Next),
}

impl Boss {
    pub(crate) fn update_state(&mut self, dt: f32, world: &dyn BossWorld) {
        let mut state = std::mem::replace(&mut self.state, BossState::Idle);
        let update = match &mut state {
            BossState::Idle => self.update_idle(world),
            BossState::Chase(chase) => self.update_chase(chase, dt, world),
            BossState::Attack(attack) => self.update_attack(attack, dt, world),
            BossState::Defend(defend) => self.update_defend(defend, dt, world),
            BossState::Special(ability) => self.update_special(ability, dt, world),
            BossState::Dead(_) => StateUpdate::Stay,
        };
        self.state = state;

        if let StateUpdate::Go(next) = update {
            self.transition(next, world);
        }
    }

    /// Guarded transition. Invalid requests are dropped with a diagnostic.
    pub(crate) fn transition(&mut self, next: Next, world: &dyn BossWorld) {
        let to = next.kind();
        if self.is_dead {
            debug!("{}: ignoring {:?} transition, boss is dead", self.config.name, to);
            return;
        }
        if self.transition.is_some() && to != BossStateKind::Idle {
            debug!(
                "{}: ignoring {:?} transition during phase transition",
                self.config.name, to
            );
            return;
        }

        match next {
            Next::Idle => self.replace_state(BossState::Idle),
            Next::Chase => self.replace_state(BossState::chase()),
            Next::Attack => self.replace_state(BossState::Attack(AttackState::default())),
            Next::Defend => {
                if !self.is_ability_available(AbilityKind::Defend) {
                    debug!("{}: defend unavailable", self.config.name);
                    return;
                }
                let resume = self.state.kind();
                self.replace_state(BossState::Defend(DefendState {
                    remaining: self.config.defend.duration,
                    resume,
                }));
                self.is_defending = true;
                self.use_ability(AbilityKind::Defend);
            }
            Next::Special(decision) => {
                let Some(ability) = self.launch_special(decision, world) else {
                    return;
                };
                self.replace_state(BossState::Special(ability));
                self.begin_special();
            }
        }
    }

    /// Swap states, running the exit hook of the outgoing one. Unguarded.
    pub(crate) fn replace_state(&mut self, next: BossState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.exit_state(&previous);

        let (from, to) = (previous.kind(), self.state.kind());
        debug!("{}: {:?} -> {:?}", self.config.name, from, to);
        self.signals.push(BossSignal::StateChanged { from, to });
    }

    fn exit_state(&mut self, previous: &BossState) {
        match previous {
            BossState::Defend(_) => self.is_defending = false,
            BossState::Special(ability) if !ability.is_finished() => {
                // Preempted mid-sequence
                self.effects.stop_telegraph(ability.kind());
            }
            _ => {}
        }
    }

    /// Cancel whatever is running and park in Idle.
    pub(crate) fn force_idle(&mut self) {
        if !matches!(self.state, BossState::Idle | BossState::Dead(_)) {
            self.replace_state(BossState::Idle);
        }
    }

    pub(crate) fn use_ability(&mut self, kind: AbilityKind) {
        self.cooldowns.mark_used(kind, self.clock);
        self.signals.push(BossSignal::AttackStarted(kind));
    }

    fn update_idle(&mut self, world: &dyn BossWorld) -> StateUpdate {
        if self.stun_remaining > 0.0 {
            return StateUpdate::Stay;
        }

        if self.target_position(world).is_some() {
            return StateUpdate::Go(Next::Chase);
        }

        match world.find_target(self.position, self.config.detection_range) {
            Some(found) => {
                debug!("{}: acquired target {:?}", self.config.name, found);
                self.target = Some(found);
                StateUpdate::Go(Next::Chase)
            }
            None => StateUpdate::Stay,
        }
    }

    fn update_chase(
        &mut self,
        chase: &mut ChaseState,
        dt: f32,
        world: &dyn BossWorld,
    ) -> StateUpdate {
        let Some(target_position) = self.target_position(world) else {
            chase.lost_timer += dt;
            if chase.lost_timer > self.config.lose_target_time {
                self.target = None;
                return StateUpdate::Go(Next::Idle);
            }
            return StateUpdate::Stay;
        };
        chase.lost_timer = 0.0;

        self.face_towards(target_position);
        let distance = self.position.distance(target_position);
        if distance <= self.config.attack_range {
            return StateUpdate::Go(Next::Attack);
        }

        chase.decision_timer += dt;
        if chase.decision_timer >= self.config.decision_interval {
            chase.decision_timer = 0.0;

            let ctx = self.selection_context(distance, Some(target_position));
            let decision = selection::select_attack(&ctx, &self.config.selection, &mut self.rng);
            match decision.kind {
                AbilityKind::ClawCombo => {}
                AbilityKind::Defend => return StateUpdate::Go(Next::Defend),
                _ => return StateUpdate::Go(Next::Special(decision)),
            }
        }

        self.move_towards(target_position, dt, world);
        StateUpdate::Stay
    }

    fn update_attack(
        &mut self,
        attack: &mut AttackState,
        dt: f32,
        world: &dyn BossWorld,
    ) -> StateUpdate {
        let target_position = self.target_position(world);

        if let Some(combo) = attack.combo.as_mut() {
            if let Some(position) = target_position {
                self.face_towards(position);
            }

            let interval = self.config.combo.hit_interval / self.modifiers.attack_speed;
            combo.hit_timer -= dt;
            while combo.hit_timer <= 0.0 && combo.hits_done < self.config.combo.hits {
                self.perform_claw_hit(combo.hits_done, world);
                combo.hits_done += 1;
                combo.hit_timer += interval;
            }

            if combo.hits_done < self.config.combo.hits || combo.hit_timer > 0.0 {
                return StateUpdate::Stay;
            }
            attack.combo = None;
        }

        let Some(position) = target_position else {
            return StateUpdate::Go(Next::Idle);
        };
        if self.position.distance(position) > self.config.attack_range {
            return StateUpdate::Go(Next::Chase);
        }

        if self.is_ability_available(AbilityKind::ClawCombo) {
            self.use_ability(AbilityKind::ClawCombo);
            attack.combo = Some(ComboSequence::default());
        }
        StateUpdate::Stay
    }

    fn update_defend(
        &mut self,
        defend: &mut DefendState,
        dt: f32,
        world: &dyn BossWorld,
    ) -> StateUpdate {
        defend.remaining -= dt;
        if defend.remaining > 0.0 {
            return StateUpdate::Stay;
        }

        let has_target = self.target_position(world).is_some();
        match defend.resume {
            BossStateKind::Idle => StateUpdate::Go(Next::Idle),
            _ if has_target => StateUpdate::Go(Next::Chase),
            _ => StateUpdate::Go(Next::Idle),
        }
    }

    /// Where to go once a scripted ability completes
    pub(crate) fn next_after_ability(&self, world: &dyn BossWorld) -> Next {
        match self.target_position(world) {
            None => Next::Idle,
            Some(position) if self.position.distance(position) <= self.config.attack_range => {
                Next::Attack
            }
            Some(_) => Next::Chase,
        }
    }

    pub(crate) fn face_towards(&mut self, position: Vec2) {
        let direction = (position - self.position).normalize_or_zero();
        if direction != Vec2::ZERO {
            self.facing = direction;
        }
    }

    fn move_towards(&mut self, position: Vec2, dt: f32, world: &dyn BossWorld) {
        let offset = position - self.position;
        let step = (self.config.move_speed * self.modifiers.move_speed * dt).min(offset.length());
        if step <= 0.0 {
            return;
        }

        let next = self.position + offset.normalize_or_zero() * step;
        if world.is_obstructed(self.position, next) {
            return;
        }
        self.position = next;
    }
}
