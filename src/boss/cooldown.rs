//! Boss domain: ability kinds and the cooldown registry.

use serde::{Deserialize, Serialize};

use crate::boss::config::CooldownTable;
use crate::boss::phase::Phase;

/// Every ability the boss can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AbilityKind {
    /// Melee multi-hit combo, always unlocked
    ClawCombo,
    Charge,
    Defend,
    LaserSweep,
    Summon,
    Earthquake,
    WeakPointExpose,
}

impl AbilityKind {
    pub const COUNT: usize = 7;

    pub const ALL: [AbilityKind; Self::COUNT] = [
        AbilityKind::ClawCombo,
        AbilityKind::Charge,
        AbilityKind::Defend,
        AbilityKind::LaserSweep,
        AbilityKind::Summon,
        AbilityKind::Earthquake,
        AbilityKind::WeakPointExpose,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether `phase` unlocks this ability. Nothing is unlocked once defeated.
    pub fn unlocked_in(self, phase: Phase) -> bool {
        if phase == Phase::Defeated {
            return false;
        }
        match self {
            AbilityKind::LaserSweep | AbilityKind::Summon => phase >= Phase::Phase2,
            AbilityKind::Earthquake => phase >= Phase::Phase3,
            AbilityKind::ClawCombo
            | AbilityKind::Charge
            | AbilityKind::Defend
            | AbilityKind::WeakPointExpose => true,
        }
    }

    /// Multi-tick scripted abilities run inside the Special state
    pub fn is_special(self) -> bool {
        matches!(
            self,
            AbilityKind::Charge
                | AbilityKind::LaserSweep
                | AbilityKind::Summon
                | AbilityKind::Earthquake
        )
    }
}

/// Last use and fixed cooldown of one ability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilityCooldownState {
    /// Encounter clock time of the last use, `None` if never used
    pub last_used_at: Option<f32>,
    pub cooldown: f32,
}

impl AbilityCooldownState {
    pub fn is_available(&self, now: f32) -> bool {
        self.remaining(now) <= 0.0
    }

    pub fn remaining(&self, now: f32) -> f32 {
        match self.last_used_at {
            None => 0.0,
            Some(last) => (self.cooldown - (now - last).max(0.0)).max(0.0),
        }
    }
}

/// Timestamp-based cooldown tracking, one entry per [`AbilityKind`].
#[derive(Debug, Clone)]
pub struct CooldownRegistry {
    entries: [AbilityCooldownState; AbilityKind::COUNT],
}

impl CooldownRegistry {
    pub fn new(table: &CooldownTable) -> Self {
        Self {
            entries: AbilityKind::ALL.map(|kind| AbilityCooldownState {
                last_used_at: None,
                cooldown: table.get(kind),
            }),
        }
    }

    pub fn is_available(&self, kind: AbilityKind, now: f32) -> bool {
        self.entries[kind.index()].is_available(now)
    }

    pub fn mark_used(&mut self, kind: AbilityKind, now: f32) {
        self.entries[kind.index()].last_used_at = Some(now);
    }

    /// Seconds until `kind` is usable again
    pub fn remaining(&self, kind: AbilityKind, now: f32) -> f32 {
        self.entries[kind.index()].remaining(now)
    }

    pub fn state(&self, kind: AbilityKind) -> &AbilityCooldownState {
        &self.entries[kind.index()]
    }

    /// Forget every use, for a fresh encounter
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.last_used_at = None;
        }
    }
}
