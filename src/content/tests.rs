//! Content domain: unit tests for boss config loading.

use std::path::Path;

use super::{BOSS_CONFIG_PATH, load_boss_config, load_boss_tuning, parse_boss_config};
use crate::boss::BossConfig;

#[test]
fn test_partial_config_keeps_defaults() {
    let source = r#"(
        name: "Training Beast",
        max_health: 1200.0,
        cooldowns: (charge: 4.0),
    )"#;

    let config = parse_boss_config(source, "inline.ron").expect("valid config");
    assert_eq!(config.name, "Training Beast");
    assert_eq!(config.max_health, 1200.0);
    assert_eq!(config.cooldowns.charge, 4.0);
    assert_eq!(config.cooldowns.summon, 20.0);
    assert_eq!(config.defend.break_chance, 0.1);
}

#[test]
fn test_invalid_values_are_reported() {
    let source = r#"(
        thresholds: (phase2_at: 0.2, phase3_at: 0.4),
        defend: (damage_reduction: 2.0),
    )"#;

    let errors = parse_boss_config(source, "broken.ron").expect_err("invalid config");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.file == "broken.ron"));
    assert!(errors[0].to_string().contains("thresholds"));
}

#[test]
fn test_syntax_error_is_a_parse_error() {
    let errors = parse_boss_config("(max_health: )", "bad.ron").expect_err("parse error");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.starts_with("Parse error"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let path = Path::new("assets/data/does_not_exist.ron");
    let errors = load_boss_config(path).expect_err("missing file");
    assert!(errors[0].message.starts_with("IO error"));

    let tuning = load_boss_tuning(path);
    assert_eq!(tuning.0.max_health, BossConfig::default().max_health);
}

#[test]
fn test_shipped_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(BOSS_CONFIG_PATH);
    let config = load_boss_config(&path).expect("shipped config loads");
    assert_eq!(config.name, "Iron Claw Beast");
    assert_eq!(config.max_health, 5000.0);
    assert_eq!(config.thresholds.phase2_at, 0.6);
}
