//! Initiative: one die per combatant, plus personal and side modifiers, into
//! a strict total order.
//!
//! Ordering, first difference wins:
//! 1. higher total score
//! 2. higher personal initiative modifier
//! 3. earlier position in the input list
//!
//! The last tier never consults the dice, so fixed rolls always give the
//! same order.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::Dice;
use crate::combatant::{Combatant, Side};
use crate::error::TrackerError;

const D20: i32 = 20;

/// Die used for initiative. Anything under two sides is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiativeRules {
    pub die_sides: i32,
}

impl Default for InitiativeRules {
    fn default() -> Self {
        Self { die_sides: D20 }
    }
}

impl InitiativeRules {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.die_sides < 2 {
            return Err(TrackerError::InvalidDie {
                sides: self.die_sides,
            });
        }
        Ok(())
    }
}

/// Per-encounter bonus (or penalty) for everyone on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SituationalModifiers {
    pub player: i32,
    pub monster: i32,
}

impl SituationalModifiers {
    pub fn new(player: i32, monster: i32) -> Self {
        Self { player, monster }
    }

    pub fn for_side(&self, side: Side) -> i32 {
        match side {
            Side::Player => self.player,
            Side::Monster => self.monster,
        }
    }
}

/// The three values the order is decided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiativeKey {
    pub total_score: i32,
    pub initiative_modifier: i32,
    pub position: usize,
}

/// `Less` means `a` acts before `b`.
pub fn initiative_order(a: &InitiativeKey, b: &InitiativeKey) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| b.initiative_modifier.cmp(&a.initiative_modifier))
        .then_with(|| a.position.cmp(&b.position))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiativeEntry<'a> {
    pub total_score: i32,
    /// The raw die result before any modifier.
    pub roll: i32,
    /// Index of the combatant in the slice handed to the resolver.
    pub position: usize,
    pub combatant: &'a Combatant,
}

impl InitiativeEntry<'_> {
    pub fn key(&self) -> InitiativeKey {
        InitiativeKey {
            total_score: self.total_score,
            initiative_modifier: self.combatant.initiative_modifier,
            position: self.position,
        }
    }
}

/// Roll a d20 for every combatant and order them.
pub fn roll_initiative<'a>(
    combatants: &'a [Combatant],
    player_mod: i32,
    monster_mod: i32,
    dice: &mut Dice,
) -> Result<Vec<InitiativeEntry<'a>>, TrackerError> {
    roll_initiative_with(
        combatants,
        SituationalModifiers::new(player_mod, monster_mod),
        InitiativeRules::default(),
        dice,
    )
}

/// Like [`roll_initiative`] with an explicit die. Input is validated before
/// the first roll; a failing die aborts the whole call.
pub fn roll_initiative_with<'a>(
    combatants: &'a [Combatant],
    mods: SituationalModifiers,
    rules: InitiativeRules,
    dice: &mut Dice,
) -> Result<Vec<InitiativeEntry<'a>>, TrackerError> {
    rules.validate()?;
    if combatants.iter().any(|c| c.name.trim().is_empty()) {
        return Err(TrackerError::EmptyName);
    }

    let mut entries = combatants
        .iter()
        .enumerate()
        .map(|(position, combatant)| roll_entry(position, combatant, mods, rules, dice))
        .collect::<Result<Vec<_>, _>>()?;

    entries.sort_by(|a, b| initiative_order(&a.key(), &b.key()));
    info!(combatants = entries.len(), "initiative order resolved");
    Ok(entries)
}

/// Roll for a single combatant. `position` becomes its last-resort tie-break.
pub fn roll_entry<'a>(
    position: usize,
    combatant: &'a Combatant,
    mods: SituationalModifiers,
    rules: InitiativeRules,
    dice: &mut Dice,
) -> Result<InitiativeEntry<'a>, TrackerError> {
    let roll = dice.roll(rules.die_sides)?;
    let total_score = roll + combatant.initiative_modifier + mods.for_side(combatant.side);
    debug!(
        name = %combatant.name,
        side = %combatant.side,
        roll,
        total_score,
        "initiative rolled"
    );
    Ok(InitiativeEntry {
        total_score,
        roll,
        position,
        combatant,
    })
}
