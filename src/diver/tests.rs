//! Diver domain: unit tests for taking boss hits.

use bevy::prelude::*;

use super::{Diver, apply_boss_hits};
use crate::arena::{BossHitTargetEvent, BossTarget};
use crate::boss::AbilityKind;

#[test]
fn test_diver_health_clamps() {
    let mut diver = Diver::new(100.0);
    diver.take_hit(40.0);
    assert_eq!(diver.health, 60.0);
    diver.take_hit(500.0);
    assert_eq!(diver.health, 0.0);
    assert!(diver.is_down());
}

#[test]
fn test_boss_hits_damage_the_diver() {
    let mut app = App::new();
    app.add_message::<BossHitTargetEvent>()
        .add_systems(Update, apply_boss_hits);

    let diver = app.world_mut().spawn(Diver::new(1000.0)).id();
    let boss = app.world_mut().spawn_empty().id();

    app.world_mut().write_message(BossHitTargetEvent {
        boss,
        target: diver,
        damage: 75.0,
        source: AbilityKind::Charge,
    });
    app.update();

    let health = app.world().get::<Diver>(diver).map(|d| d.health);
    assert_eq!(health, Some(925.0));
}

#[test]
fn test_downed_diver_is_no_longer_a_target() {
    let mut app = App::new();
    app.add_message::<BossHitTargetEvent>()
        .add_systems(Update, apply_boss_hits);

    let diver = app.world_mut().spawn((Diver::new(100.0), BossTarget)).id();
    let boss = app.world_mut().spawn_empty().id();

    app.world_mut().write_message(BossHitTargetEvent {
        boss,
        target: diver,
        damage: 60.0,
        source: AbilityKind::ClawCombo,
    });
    app.update();
    assert!(app.world().get::<BossTarget>(diver).is_some());

    app.world_mut().write_message(BossHitTargetEvent {
        boss,
        target: diver,
        damage: 60.0,
        source: AbilityKind::ClawCombo,
    });
    app.update();

    let downed = app.world().get::<Diver>(diver).map(Diver::is_down);
    assert_eq!(downed, Some(true));
    assert!(app.world().get::<BossTarget>(diver).is_none());
}
