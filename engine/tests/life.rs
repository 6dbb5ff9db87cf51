use bt_engine::life::*;
use bt_engine::{Combatant, Side};

fn noop_log(_: String) {}

#[test]
fn player_slides_from_dying_to_dead() {
    let mut hero = Combatant::player("Hero", 2, 20).unwrap();
    let status = apply_damage(&mut hero, 25, noop_log);
    assert_eq!(hero.current_hp, -5);
    assert_eq!(status, LifeStatus::Dying);

    let status = apply_damage(&mut hero, 10, noop_log);
    assert_eq!(hero.current_hp, -15);
    assert_eq!(status, LifeStatus::Dead);
}

#[test]
fn player_thresholds() {
    assert_eq!(classify(Side::Player, 0, 20), LifeStatus::Disabled);
    assert_eq!(classify(Side::Player, -1, 20), LifeStatus::Dying);
    assert_eq!(classify(Side::Player, -9, 20), LifeStatus::Dying);
    assert_eq!(classify(Side::Player, -10, 20), LifeStatus::Dead);
    assert_eq!(classify(Side::Player, 10, 20), LifeStatus::Bloodied);
    assert_eq!(classify(Side::Player, 11, 20), LifeStatus::Healthy);
}

#[test]
fn monsters_just_die() {
    assert_eq!(classify(Side::Monster, 0, 7), LifeStatus::Dead);
    assert_eq!(classify(Side::Monster, -3, 7), LifeStatus::Dead);
    assert_eq!(classify(Side::Monster, 3, 7), LifeStatus::Bloodied);
    assert_eq!(classify(Side::Monster, 4, 7), LifeStatus::Healthy);
}

#[test]
fn healing_is_not_capped() {
    let mut hero = Combatant::player("Hero", 2, 20).unwrap();
    let status = heal(&mut hero, 6, noop_log);
    assert_eq!(hero.current_hp, 26);
    assert_eq!(status, LifeStatus::Healthy);
}

#[test]
fn healing_brings_a_dying_player_back() {
    let mut hero = Combatant::player("Hero", 2, 20).unwrap();
    hero.current_hp = -4;
    let mut seen = vec![];
    let status = heal(&mut hero, 8, |s| seen.push(s));
    assert_eq!(hero.current_hp, 4);
    assert_eq!(status, LifeStatus::Bloodied);
    assert!(seen.iter().any(|l| l.contains("[STATE][Hero] dying → bloodied")));
}

#[test]
fn damage_logs_state_changes_only_when_they_happen() {
    let mut gob = Combatant::monster("Goblin A", 1, 7).unwrap();
    let mut seen = vec![];
    apply_damage(&mut gob, 1, |s| seen.push(s));
    assert_eq!(seen.len(), 1);
    apply_damage(&mut gob, 9, |s| seen.push(s));
    assert_eq!(gob.current_hp, -3);
    assert!(seen.last().unwrap().contains("healthy → dead"));
    assert!(LifeStatus::Dead.is_down());
    assert!(!LifeStatus::Bloodied.is_down());
}
