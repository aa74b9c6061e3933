//! Boss domain: health-driven phase model and the phase transition protocol.

use bevy::log::info;
use serde::{Deserialize, Serialize};

use crate::boss::combatant::Boss;
use crate::boss::events::BossSignal;
use crate::boss::state::BossState;
use crate::boss::world::BossWorld;

/// Discrete difficulty tier. Ordered, and only ever advances during an encounter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, Serialize,
)]
pub enum Phase {
    #[default]
    Phase1,
    Phase2,
    Phase3,
    Defeated,
}

impl Phase {
    /// Human-facing phase number (Defeated reports 0)
    pub fn number(self) -> u8 {
        match self {
            Phase::Phase1 => 1,
            Phase::Phase2 => 2,
            Phase::Phase3 => 3,
            Phase::Defeated => 0,
        }
    }
}

/// Health fractions at which the boss advances. `phase3_at < phase2_at < 1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhaseThresholds {
    pub phase2_at: f32,
    pub phase3_at: f32,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            phase2_at: 0.6,
            phase3_at: 0.3,
        }
    }
}

impl PhaseThresholds {
    /// Phase implied by a health fraction, checking the deepest threshold first.
    pub fn phase_for(&self, health_fraction: f32) -> Phase {
        if health_fraction <= self.phase3_at {
            Phase::Phase3
        } else if health_fraction <= self.phase2_at {
            Phase::Phase2
        } else {
            Phase::Phase1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
}

/// Tracks the current phase and reports strict advances only.
#[derive(Debug, Clone)]
pub struct PhaseModel {
    thresholds: PhaseThresholds,
    current: Phase,
}

impl PhaseModel {
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self {
            thresholds,
            current: Phase::Phase1,
        }
    }

    pub fn current(&self) -> Phase {
        self.current
    }

    /// Advance the phase if `health_fraction` crossed a deeper threshold.
    /// Healing never reverts the phase, and a defeated model never changes.
    pub fn update_phase(&mut self, health_fraction: f32) -> Option<PhaseChange> {
        if self.current == Phase::Defeated {
            return None;
        }

        let candidate = self.thresholds.phase_for(health_fraction);
        if candidate <= self.current {
            return None;
        }

        let change = PhaseChange {
            from: self.current,
            to: candidate,
        };
        self.current = candidate;
        Some(change)
    }

    /// Mark the boss defeated. Returns false if it already was.
    pub fn defeat(&mut self) -> bool {
        let changed = self.current != Phase::Defeated;
        self.current = Phase::Defeated;
        changed
    }

    pub fn reset(&mut self) {
        self.current = Phase::Phase1;
    }
}

/// Progress reported by [`PhaseTransition::advance`] for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionProgress {
    pub apply_modifiers: bool,
    pub finished: bool,
}

/// An in-flight phase transition: modifiers land first, invincibility ends later.
#[derive(Debug, Clone)]
pub struct PhaseTransition {
    pub phase: Phase,
    pub elapsed: f32,
    modifiers_applied: bool,
}

impl PhaseTransition {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            elapsed: 0.0,
            modifiers_applied: false,
        }
    }

    pub fn modifiers_applied(&self) -> bool {
        self.modifiers_applied
    }

    pub fn advance(&mut self, dt: f32, apply_at: f32, finish_at: f32) -> TransitionProgress {
        self.elapsed += dt;

        let apply_modifiers = !self.modifiers_applied && self.elapsed >= apply_at;
        if apply_modifiers {
            self.modifiers_applied = true;
        }

        TransitionProgress {
            apply_modifiers,
            finished: self.elapsed >= finish_at,
        }
    }
}

impl Boss {
    /// Start the transition protocol for a phase advance detected on damage.
    pub(crate) fn begin_phase_transition(&mut self, change: PhaseChange) {
        if change.to == Phase::Phase3 {
            self.is_enraged = true;
        }

        self.transition = Some(PhaseTransition::new(change.to));
        self.force_idle();

        self.signals
            .push(BossSignal::PhaseTransitionStarted(change.to));
        self.signals.push(BossSignal::PhaseChanged(change.to));

        info!(
            "{} entering {:?} from {:?} (enraged: {})",
            self.config.name, change.to, change.from, self.is_enraged
        );
    }

    /// Advance the running transition. The state machine stays parked in Idle until it ends.
    pub(crate) fn advance_phase_transition(&mut self, dt: f32, world: &dyn BossWorld) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        let progress = transition.advance(
            dt,
            self.config.phase_transition_duration,
            self.config.phase_transition_invincible_time,
        );
        let phase = transition.phase;

        if progress.apply_modifiers {
            self.modifiers = self.config.modifiers_for(phase);
            info!(
                "{} {:?} modifiers applied: {:?}",
                self.config.name, phase, self.modifiers
            );
        }

        if progress.finished {
            self.transition = None;
            self.signals.push(BossSignal::PhaseTransitionEnded(phase));

            let resume = if self.target_position(world).is_some() {
                BossState::chase()
            } else {
                BossState::Idle
            };
            self.replace_state(resume);
        }
    }
}
