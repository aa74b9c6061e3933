//! Boss domain: outbound signals drained by the host each tick.

use crate::boss::cooldown::AbilityKind;
use crate::boss::phase::Phase;
use crate::boss::state::BossStateKind;
use crate::boss::world::TargetId;

#[derive(Debug, Clone, PartialEq)]
pub enum BossSignal {
    PhaseChanged(Phase),
    PhaseTransitionStarted(Phase),
    PhaseTransitionEnded(Phase),
    HealthChanged { current: f32, max: f32 },
    /// Damage actually removed from health
    TakeDamage(f32),
    Defeated,
    /// Death fade finished, the host may remove the boss
    Despawned,
    AttackStarted(AbilityKind),
    WeakPointExposed,
    DefendBroken,
    StateChanged {
        from: BossStateKind,
        to: BossStateKind,
    },
    /// The boss connected with a target; the host applies the damage
    TargetHit {
        target: TargetId,
        damage: f32,
        source: AbilityKind,
    },
}

/// Ordered outbound queue. Signals keep emission order until drained.
#[derive(Debug, Default)]
pub struct SignalQueue {
    pending: Vec<BossSignal>,
}

impl SignalQueue {
    pub fn push(&mut self, signal: BossSignal) {
        self.pending.push(signal);
    }

    pub fn drain(&mut self) -> Vec<BossSignal> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[BossSignal] {
        &self.pending
    }
}
