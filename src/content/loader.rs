//! Loader for RON boss configuration files.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use crate::boss::BossConfig;

/// Error type for content loading failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a single RON struct from disk.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_single(&contents, &file_name)
}

fn parse_single<T>(source: &str, file_name: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(source)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Parse and validate a boss config. Omitted fields keep their defaults.
pub fn parse_boss_config(
    source: &str,
    file_name: &str,
) -> Result<BossConfig, Vec<ContentLoadError>> {
    let config: BossConfig = parse_single(source, file_name).map_err(|e| vec![e])?;
    validated(config, file_name)
}

/// Load `path` and validate it. Returns every problem found.
pub fn load_boss_config(path: &Path) -> Result<BossConfig, Vec<ContentLoadError>> {
    let config: BossConfig = load_single_file(path).map_err(|e| vec![e])?;
    validated(config, &path.display().to_string())
}

fn validated(config: BossConfig, file_name: &str) -> Result<BossConfig, Vec<ContentLoadError>> {
    let errors: Vec<ContentLoadError> = config
        .validate()
        .into_iter()
        .map(|e| ContentLoadError {
            file: file_name.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        debug!("Loaded boss config '{}' from {}", config.name, file_name);
        Ok(config)
    } else {
        Err(errors)
    }
}
