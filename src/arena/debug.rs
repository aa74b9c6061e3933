//! Arena domain: developer hotkeys for the boss encounter.

use bevy::prelude::*;

use crate::arena::components::{BossEncounter, Minion};
use crate::arena::resources::ArenaState;

/// F1 kills the boss, F2 resets the encounter, F3 dumps a snapshot.
pub(crate) fn boss_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<ArenaState>,
    mut bosses: Query<&mut BossEncounter>,
    minions: Query<Entity, With<Minion>>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        for mut encounter in &mut bosses {
            encounter.boss.force_kill();
        }
        info!("Debug: boss killed");
    }

    if keyboard.just_pressed(KeyCode::F2) {
        for mut encounter in &mut bosses {
            encounter.boss.reset();
            encounter.effects.drain();
        }
        for minion in &minions {
            commands.entity(minion).despawn();
        }
        state.begin_encounter();
        state.announcement = None;
        info!("Debug: encounter reset");
    }

    if keyboard.just_pressed(KeyCode::F3) {
        for encounter in &bosses {
            match serde_json::to_string_pretty(&encounter.boss.snapshot()) {
                Ok(json) => info!("Boss snapshot:\n{}", json),
                Err(e) => warn!("Failed to serialize boss snapshot: {}", e),
            }
        }
    }
}
