//! Boss domain: the Iron Claw Beast phase/attack state machine.
//!
//! Engine-free. The host owns a [`Boss`], calls [`Boss::tick`] once per
//! simulation step with a [`BossWorld`] answering spatial queries, feeds
//! damage through [`Boss::take_damage`], and drains [`BossSignal`]s.

mod abilities;
mod combat;
mod combatant;
mod config;
mod cooldown;
mod events;
mod phase;
mod selection;
mod state;
mod world;

pub use abilities::{SequencePhase, SpecialAbility};
pub use combat::{angle_between, is_weak_point_hit, within_cone};
pub use combatant::{Boss, BossRng, BossSetupError, BossSnapshot};
pub use config::{
    BossConfig, ChargeTuning, ComboTuning, ConfigError, CooldownTable, DefendTuning,
    EarthquakeTuning, LaserTuning, PhaseModifiers, SelectionTuning, SummonTuning,
    WeakPointTuning,
};
pub use cooldown::{AbilityCooldownState, AbilityKind, CooldownRegistry};
pub use events::{BossSignal, SignalQueue};
pub use phase::{Phase, PhaseChange, PhaseModel, PhaseThresholds, PhaseTransition};
pub use selection::{Availability, AttackDecision, SelectionContext, select_attack};
pub use state::{BossState, BossStateKind};
pub use world::{BossEffects, BossWorld, NullEffects, TargetId};
