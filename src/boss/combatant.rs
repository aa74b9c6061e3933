//! Boss domain: the combatant aggregate and its command surface.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::boss::config::{BossConfig, ConfigError, PhaseModifiers};
use crate::boss::cooldown::{AbilityKind, CooldownRegistry};
use crate::boss::events::{BossSignal, SignalQueue};
use crate::boss::phase::{Phase, PhaseModel, PhaseTransition};
use crate::boss::selection::{Availability, SelectionContext};
use crate::boss::state::{BossState, BossStateKind};
use crate::boss::world::{BossEffects, BossWorld, TargetId};

/// Random source owned by the boss: defend breaks and the selection cascade.
pub type BossRng = Box<dyn RngCore + Send + Sync>;

/// Raised when an encounter cannot be set up.
#[derive(Debug, Clone, PartialEq)]
pub enum BossSetupError {
    InvalidConfig(Vec<ConfigError>),
}

impl std::fmt::Display for BossSetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BossSetupError::InvalidConfig(errors) => {
                write!(f, "boss config has {} error(s)", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for BossSetupError {}

/// Consistent read-only copy of the boss for UI and director polling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossSnapshot {
    pub name: String,
    pub current_health: f32,
    pub max_health: f32,
    pub phase: Phase,
    pub state: BossStateKind,
    pub active_ability: Option<AbilityKind>,
    pub is_dead: bool,
    pub is_invincible: bool,
    pub is_in_phase_transition: bool,
    pub is_defending: bool,
    pub is_enraged: bool,
    pub is_weak_point_exposed: bool,
    pub collision_enabled: bool,
    pub current_combo: u32,
    pub position: [f32; 2],
    pub facing: [f32; 2],
    pub modifiers: PhaseModifiers,
}

/// The Iron Claw Beast. Exclusively owned by its encounter; driven by
/// [`Boss::tick`] and mutated only through its own commands.
pub struct Boss {
    pub(crate) config: BossConfig,
    pub(crate) health: f32,
    pub(crate) phase_model: PhaseModel,
    pub(crate) transition: Option<PhaseTransition>,
    pub(crate) modifiers: PhaseModifiers,
    pub(crate) is_enraged: bool,
    pub(crate) is_defending: bool,
    pub(crate) is_dead: bool,
    pub(crate) despawned: bool,
    pub(crate) stun_remaining: f32,
    pub(crate) weak_point_remaining: f32,
    pub(crate) current_combo: u32,
    pub(crate) since_last_hit: f32,
    pub(crate) cooldowns: CooldownRegistry,
    pub(crate) state: BossState,
    pub(crate) target: Option<TargetId>,
    pub(crate) position: Vec2,
    pub(crate) spawn_position: Vec2,
    pub(crate) facing: Vec2,
    /// Encounter clock, seconds since spawn or reset
    pub(crate) clock: f32,
    pub(crate) signals: SignalQueue,
    pub(crate) effects: Box<dyn BossEffects>,
    pub(crate) rng: BossRng,
}

impl std::fmt::Debug for Boss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Boss")
            .field("name", &self.config.name)
            .field("health", &self.health)
            .field("phase", &self.phase_model.current())
            .field("state", &self.state.kind())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl Boss {
    /// Validate `config` and build a boss at `position`.
    pub fn new(
        config: BossConfig,
        position: Vec2,
        effects: Box<dyn BossEffects>,
        rng: BossRng,
    ) -> Result<Self, BossSetupError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(BossSetupError::InvalidConfig(errors));
        }

        info!(
            "Spawning {} with {} health at {:?}",
            config.name, config.max_health, position
        );

        Ok(Self {
            health: config.max_health,
            phase_model: PhaseModel::new(config.thresholds),
            transition: None,
            modifiers: PhaseModifiers::default(),
            is_enraged: false,
            is_defending: false,
            is_dead: false,
            despawned: false,
            stun_remaining: 0.0,
            weak_point_remaining: 0.0,
            current_combo: 0,
            since_last_hit: 0.0,
            cooldowns: CooldownRegistry::new(&config.cooldowns),
            state: BossState::Idle,
            target: None,
            position,
            spawn_position: position,
            facing: Vec2::NEG_X,
            clock: 0.0,
            signals: SignalQueue::default(),
            effects,
            rng,
            config,
        })
    }

    /// Same as [`Boss::new`] with a reproducible ChaCha stream.
    pub fn with_seed(
        config: BossConfig,
        position: Vec2,
        effects: Box<dyn BossEffects>,
        seed: u64,
    ) -> Result<Self, BossSetupError> {
        Self::new(
            config,
            position,
            effects,
            Box::new(ChaCha8Rng::seed_from_u64(seed)),
        )
    }

    /// Advance the encounter by `dt` seconds.
    pub fn tick(&mut self, dt: f32, world: &dyn BossWorld) {
        if self.despawned {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;
        self.tick_timers(dt);

        if self.is_dead {
            self.update_dead(dt);
            return;
        }
        if self.transition.is_some() {
            self.advance_phase_transition(dt, world);
            return;
        }
        self.update_state(dt, world);
    }

    fn tick_timers(&mut self, dt: f32) {
        self.stun_remaining = (self.stun_remaining - dt).max(0.0);
        self.weak_point_remaining = (self.weak_point_remaining - dt).max(0.0);

        if self.current_combo > 0 {
            self.since_last_hit += dt;
            if self.since_last_hit >= self.config.combo.reset_time {
                self.current_combo = 0;
            }
        }
    }

    pub fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }

    /// Re-arm for a fresh encounter at the spawn position.
    pub fn reset(&mut self) {
        debug!("{}: reset", self.config.name);
        self.health = self.config.max_health;
        self.phase_model.reset();
        self.transition = None;
        self.modifiers = PhaseModifiers::default();
        self.is_enraged = false;
        self.is_defending = false;
        self.is_dead = false;
        self.despawned = false;
        self.stun_remaining = 0.0;
        self.weak_point_remaining = 0.0;
        self.current_combo = 0;
        self.since_last_hit = 0.0;
        self.cooldowns.reset();
        self.state = BossState::Idle;
        self.target = None;
        self.position = self.spawn_position;
        self.facing = Vec2::NEG_X;
        self.clock = 0.0;
        self.signals.push(BossSignal::HealthChanged {
            current: self.health,
            max: self.config.max_health,
        });
    }

    /// Take every signal emitted since the last drain, in emission order.
    pub fn drain_signals(&mut self) -> Vec<BossSignal> {
        self.signals.drain()
    }

    pub fn pending_signals(&self) -> &[BossSignal] {
        self.signals.pending()
    }

    pub fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            name: self.config.name.clone(),
            current_health: self.health,
            max_health: self.config.max_health,
            phase: self.phase(),
            state: self.state.kind(),
            active_ability: self.active_ability(),
            is_dead: self.is_dead,
            is_invincible: self.is_invincible(),
            is_in_phase_transition: self.is_in_phase_transition(),
            is_defending: self.is_defending,
            is_enraged: self.is_enraged,
            is_weak_point_exposed: self.is_weak_point_exposed(),
            collision_enabled: !self.is_dead,
            current_combo: self.current_combo,
            position: self.position.to_array(),
            facing: self.facing.to_array(),
            modifiers: self.modifiers,
        }
    }

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.config.max_health
    }

    pub fn health_fraction(&self) -> f32 {
        self.health / self.config.max_health
    }

    pub fn phase(&self) -> Phase {
        self.phase_model.current()
    }

    pub fn state(&self) -> &BossState {
        &self.state
    }

    pub fn state_kind(&self) -> BossStateKind {
        self.state.kind()
    }

    pub fn active_ability(&self) -> Option<AbilityKind> {
        self.state.active_ability()
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Death fade finished
    pub fn is_despawned(&self) -> bool {
        self.despawned
    }

    pub fn is_invincible(&self) -> bool {
        self.transition.is_some() || self.stun_remaining > 0.0
    }

    pub fn is_in_phase_transition(&self) -> bool {
        self.transition.is_some()
    }

    pub fn is_defending(&self) -> bool {
        self.is_defending
    }

    pub fn is_enraged(&self) -> bool {
        self.is_enraged
    }

    pub fn is_weak_point_exposed(&self) -> bool {
        self.weak_point_remaining > 0.0
    }

    pub fn current_combo(&self) -> u32 {
        self.current_combo
    }

    pub fn modifiers(&self) -> PhaseModifiers {
        self.modifiers
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    /// Host-side teleport, e.g. when the arena re-anchors the boss.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_facing(&mut self, facing: Vec2) {
        let facing = facing.normalize_or_zero();
        if facing != Vec2::ZERO {
            self.facing = facing;
        }
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn cooldowns(&self) -> &CooldownRegistry {
        &self.cooldowns
    }

    /// Off cooldown, unlocked in the current phase, and not blocked by stance.
    pub fn is_ability_available(&self, kind: AbilityKind) -> bool {
        if kind == AbilityKind::Defend && self.is_defending {
            return false;
        }
        kind.unlocked_in(self.phase()) && self.cooldowns.is_available(kind, self.clock)
    }

    pub fn availability(&self) -> Availability {
        AbilityKind::ALL
            .into_iter()
            .filter(|kind| self.is_ability_available(*kind))
            .collect()
    }

    pub(crate) fn selection_context(
        &self,
        distance: f32,
        target_position: Option<Vec2>,
    ) -> SelectionContext {
        SelectionContext {
            phase: self.phase(),
            distance,
            health_fraction: self.health_fraction(),
            availability: self.availability(),
            target_position,
        }
    }

    /// Position of the current target, `None` when unset or gone.
    pub(crate) fn target_position(&self, world: &dyn BossWorld) -> Option<Vec2> {
        self.target.and_then(|target| world.target_position(target))
    }
}
