//! Content domain: data-driven boss tuning loaded from RON.

mod loader;

#[cfg(test)]
mod tests;

pub use loader::{ContentLoadError, load_boss_config, parse_boss_config};

use std::path::PathBuf;

use bevy::prelude::*;

use crate::boss::BossConfig;

/// Default location of the boss tuning file
pub const BOSS_CONFIG_PATH: &str = "assets/data/iron_claw_beast.ron";

/// Boss configuration the arena spawns encounters from.
#[derive(Resource, Debug, Clone, Default)]
pub struct BossTuning(pub BossConfig);

/// Load the boss tuning, falling back to built-in defaults on any error.
pub fn load_boss_tuning(path: &std::path::Path) -> BossTuning {
    match load_boss_config(path) {
        Ok(config) => {
            info!("Boss tuning loaded from {}", path.display());
            BossTuning(config)
        }
        Err(errors) => {
            for e in &errors {
                warn!("{}", e);
            }
            warn!(
                "Using default boss tuning ({} error(s) in {})",
                errors.len(),
                path.display()
            );
            BossTuning::default()
        }
    }
}

pub struct ContentPlugin {
    pub boss_config_path: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            boss_config_path: PathBuf::from(BOSS_CONFIG_PATH),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_boss_tuning(&self.boss_config_path));
    }
}
