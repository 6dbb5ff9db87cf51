use bt_engine::{
    Combatant, Dice, InitiativeRules, Side, SituationalModifiers, TrackerError, roll_initiative,
    roll_initiative_with,
};
use proptest::prelude::*;

fn names(entries: &[bt_engine::InitiativeEntry<'_>]) -> Vec<String> {
    entries.iter().map(|e| e.combatant.name.clone()).collect()
}

#[test]
fn higher_total_acts_first() {
    let roster = vec![
        Combatant::player("Aria", 3, 20).unwrap(),
        Combatant::monster("Goblin A", 1, 7).unwrap(),
    ];
    let mut dice = Dice::from_scripted(vec![10, 10]);
    let order = roll_initiative(&roster, 0, 0, &mut dice).unwrap();
    assert_eq!(
        order.iter().map(|e| e.total_score).collect::<Vec<_>>(),
        vec![13, 11]
    );
    assert_eq!(names(&order), vec!["Aria", "Goblin A"]);
}

#[test]
fn full_tie_keeps_input_order_every_time() {
    let roster = vec![
        Combatant::player("Bron", 2, 24).unwrap(),
        Combatant::player("Fenn", 2, 18).unwrap(),
    ];
    for _ in 0..10 {
        let mut dice = Dice::from_scripted(vec![15, 15]);
        let order = roll_initiative(&roster, 0, 0, &mut dice).unwrap();
        assert_eq!(order[0].total_score, 17);
        assert_eq!(order[1].total_score, 17);
        assert_eq!(names(&order), vec!["Bron", "Fenn"]);
    }
}

#[test]
fn tied_total_goes_to_higher_modifier() {
    let roster = vec![
        Combatant::monster("Orc", 0, 15).unwrap(),
        Combatant::player("Kelvin", 3, 29).unwrap(),
    ];
    // 14 + 0 and 11 + 3
    let mut dice = Dice::from_scripted(vec![14, 11]);
    let order = roll_initiative(&roster, 0, 0, &mut dice).unwrap();
    assert_eq!(names(&order), vec!["Kelvin", "Orc"]);
}

#[test]
fn situational_modifiers_apply_per_side() {
    let roster = vec![
        Combatant::player("Ash", 3, 27).unwrap(),
        Combatant::monster("Demon", 3, 36).unwrap(),
    ];
    let mut dice = Dice::from_scripted(vec![10, 10]);
    let order = roll_initiative(&roster, -2, 4, &mut dice).unwrap();
    assert_eq!(order[0].combatant.name, "Demon");
    assert_eq!(order[0].total_score, 17);
    assert_eq!(order[1].total_score, 11);
    assert_eq!(order[1].roll, 10);
}

#[test]
fn empty_roster_is_not_an_error() {
    let mut dice = Dice::from_scripted(vec![]);
    let order = roll_initiative(&[], 0, 0, &mut dice).unwrap();
    assert!(order.is_empty());
}

#[test]
fn duplicate_names_are_still_ordered() {
    let roster = vec![
        Combatant::monster("Rat", 0, 2).unwrap(),
        Combatant::monster("Rat", 0, 2).unwrap(),
    ];
    let mut dice = Dice::from_scripted(vec![4, 9]);
    let order = roll_initiative(&roster, 0, 0, &mut dice).unwrap();
    assert_eq!(order[0].position, 1);
    assert_eq!(order[1].position, 0);
}

#[test]
fn exhausted_dice_fail_the_whole_call() {
    let roster = vec![
        Combatant::player("Aria", 3, 20).unwrap(),
        Combatant::player("Bron", 2, 24).unwrap(),
    ];
    let mut dice = Dice::from_scripted(vec![12]);
    let err = roll_initiative(&roster, 0, 0, &mut dice).unwrap_err();
    assert_eq!(err, TrackerError::DiceExhausted { used: 1 });
}

#[test]
fn blank_name_is_rejected_before_rolling() {
    let mut sneaky = Combatant::player("Aria", 3, 20).unwrap();
    sneaky.name = " ".into();
    let mut dice = Dice::from_scripted(vec![12]);
    let err = roll_initiative(&[sneaky], 0, 0, &mut dice).unwrap_err();
    assert_eq!(err, TrackerError::EmptyName);
    assert_eq!(dice.d20(), Ok(12));
}

#[test]
fn other_dice_sizes_work() {
    let roster = vec![Combatant::player("Aria", 3, 20).unwrap()];
    let mut dice = Dice::from_seed(9);
    let order = roll_initiative_with(
        &roster,
        SituationalModifiers::default(),
        InitiativeRules { die_sides: 6 },
        &mut dice,
    )
    .unwrap();
    assert!((1..=6).contains(&order[0].roll));
    assert_eq!(order[0].total_score, order[0].roll + 3);
}

#[test]
fn resolver_does_not_touch_combatants() {
    let mut aria = Combatant::player("Aria", 3, 20).unwrap();
    aria.current_hp = -3;
    aria.status_effects.push("prone".into());
    let roster = vec![aria.clone()];
    let mut dice = Dice::from_seed(1);
    let order = roll_initiative(&roster, 0, 0, &mut dice).unwrap();
    assert_eq!(order[0].combatant, &aria);
}

fn roster_strategy() -> impl Strategy<Value = Vec<(i32, bool, i32)>> {
    prop::collection::vec((-5i32..=8, any::<bool>(), 1i32..=20), 0..24)
}

fn build(shape: &[(i32, bool, i32)]) -> (Vec<Combatant>, Vec<i32>) {
    let roster = shape
        .iter()
        .enumerate()
        .map(|(i, (m, is_player, _))| {
            let side = if *is_player { Side::Player } else { Side::Monster };
            Combatant::new(format!("C{}", i), side, *m, 10).unwrap()
        })
        .collect();
    let rolls = shape.iter().map(|(_, _, r)| *r).collect();
    (roster, rolls)
}

proptest! {
    #[test]
    fn ordering_is_a_sorted_permutation(
        shape in roster_strategy(),
        pm in -4i32..=4,
        mm in -4i32..=4,
    ) {
        let (roster, rolls) = build(&shape);
        let mut dice = Dice::from_scripted(rolls);
        let order = roll_initiative(&roster, pm, mm, &mut dice).unwrap();

        prop_assert_eq!(order.len(), roster.len());
        let mut positions: Vec<usize> = order.iter().map(|e| e.position).collect();
        positions.sort_unstable();
        prop_assert_eq!(positions, (0..roster.len()).collect::<Vec<_>>());

        for pair in order.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.total_score >= b.total_score);
            if a.total_score == b.total_score {
                prop_assert!(a.combatant.initiative_modifier >= b.combatant.initiative_modifier);
                if a.combatant.initiative_modifier == b.combatant.initiative_modifier {
                    prop_assert!(a.position < b.position);
                }
            }
        }
    }

    #[test]
    fn fixed_rolls_give_identical_orderings(shape in roster_strategy()) {
        let (roster, rolls) = build(&shape);
        let first = roll_initiative(&roster, 0, 0, &mut Dice::from_scripted(rolls.clone())).unwrap();
        let second = roll_initiative(&roster, 0, 0, &mut Dice::from_scripted(rolls)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn everyone_tied_keeps_input_order(n in 0usize..16, m in -3i32..=6, r in 1i32..=20) {
        let roster: Vec<Combatant> = (0..n)
            .map(|i| Combatant::player(format!("P{}", i), m, 10).unwrap())
            .collect();
        let order = roll_initiative(&roster, 0, 0, &mut Dice::from_scripted(vec![r; n])).unwrap();
        let positions: Vec<usize> = order.iter().map(|e| e.position).collect();
        prop_assert_eq!(positions, (0..n).collect::<Vec<_>>());
    }
}
