//! Arena domain: encounter settings and director state.

use bevy::prelude::*;

use crate::boss::Phase;

/// Layout and seeding of the boss arena, in world units.
#[derive(Resource, Debug, Clone)]
pub struct ArenaSettings {
    pub boss_spawn: Vec2,
    /// Half size of the walled area
    pub half_extents: Vec2,
    pub wall_thickness: f32,
    /// Seed for the boss's ChaCha stream
    pub seed: u64,
    pub announcement_time: f32,
    /// Summoned minions appear on a ring this far from the boss
    pub minion_ring_radius: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            boss_spawn: Vec2::new(8.0, 0.0),
            half_extents: Vec2::new(20.0, 12.0),
            wall_thickness: 1.0,
            seed: 0x1C0B_BEA5,
            announcement_time: 3.0,
            minion_ring_radius: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncounterOutcome {
    #[default]
    Pending,
    Victory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub text: String,
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraShake {
    pub intensity: f32,
    pub remaining: f32,
}

/// World state the encounter director maintains in response to boss signals.
#[derive(Resource, Debug, Default)]
pub struct ArenaState {
    /// Exits sealed while the boss lives
    pub locked: bool,
    pub phase: Phase,
    pub outcome: EncounterOutcome,
    pub announcement: Option<Announcement>,
    pub shake: Option<CameraShake>,
}

impl ArenaState {
    pub fn announce(&mut self, text: impl Into<String>, duration: f32) {
        self.announcement = Some(Announcement {
            text: text.into(),
            remaining: duration,
        });
    }

    /// Keep the stronger of the running and the requested shake.
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        let stronger = self
            .shake
            .is_none_or(|current| intensity >= current.intensity);
        if stronger {
            self.shake = Some(CameraShake {
                intensity,
                remaining: duration,
            });
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(announcement) = self.announcement.as_mut() {
            announcement.remaining -= dt;
            if announcement.remaining <= 0.0 {
                self.announcement = None;
            }
        }
        if let Some(shake) = self.shake.as_mut() {
            shake.remaining -= dt;
            if shake.remaining <= 0.0 {
                self.shake = None;
            }
        }
    }

    /// Fresh fight: sealed, first phase, no outcome yet.
    pub fn begin_encounter(&mut self) {
        self.locked = true;
        self.phase = Phase::Phase1;
        self.outcome = EncounterOutcome::Pending;
    }
}

/// Line shown when the boss enters `phase`
pub fn phase_announcement(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::Phase1 => None,
        Phase::Phase2 => Some("The Iron Claw Beast's armor cracks open"),
        Phase::Phase3 => Some("The Iron Claw Beast is enraged!"),
        Phase::Defeated => Some("The Iron Claw Beast has fallen"),
    }
}
