use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::Dice;
use crate::combatant::Combatant;
use crate::effects;
use crate::error::TrackerError;
use crate::initiative::{
    InitiativeKey, InitiativeRules, SituationalModifiers, initiative_order, roll_entry,
    roll_initiative_with,
};
use crate::life::{self, LifeStatus};

const TITLE_WIDTH: usize = 80;

/// A rolled place in the order, pointing back into the encounter's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitiativeSlot {
    pub position: usize,
    pub total_score: i32,
    pub roll: i32,
}

/// One fight. Owns its combatants; names are unique so they can be targeted.
#[derive(Debug, Clone)]
pub struct Encounter {
    name: String,
    modifiers: SituationalModifiers,
    rules: InitiativeRules,
    combatants: Vec<Combatant>,
    order: Vec<InitiativeSlot>,
    rolled: bool,
    round: u32,
    turn: usize,
}

impl Encounter {
    pub fn new(name: impl Into<String>, player_mod: i32, monster_mod: i32) -> Self {
        Self {
            name: name.into(),
            modifiers: SituationalModifiers::new(player_mod, monster_mod),
            rules: InitiativeRules::default(),
            combatants: Vec::new(),
            order: Vec::new(),
            rolled: false,
            round: 0,
            turn: 0,
        }
    }

    pub fn with_rules(mut self, rules: InitiativeRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifiers(&self) -> SituationalModifiers {
        self.modifiers
    }

    /// Roster in the order combatants were added.
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn is_rolled(&self) -> bool {
        self.rolled
    }

    /// 0 before initiative, then 1, 2, ...
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn get(&self, name: &str) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.name == name)
    }

    /// Only before initiative is rolled; afterwards use
    /// [`Encounter::add_reinforcement`].
    pub fn add_combatant(&mut self, combatant: Combatant) -> Result<(), TrackerError> {
        if self.rolled {
            return Err(TrackerError::InitiativeRolled(combatant.name));
        }
        self.push(combatant)
    }

    /// Add `count` monsters of one kind. More than one gets lettered
    /// ("Demon A", "Demon B", ...). Returns the names added.
    pub fn add_monsters(
        &mut self,
        kind: &str,
        count: u32,
        init_mod: i32,
        hp: i32,
    ) -> Result<Vec<String>, TrackerError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        let names: Vec<String> = match count {
            0 => Vec::new(),
            1 => vec![kind.to_string()],
            n => (0..n as usize)
                .map(|i| format!("{} {}", kind, letterer(i)))
                .collect(),
        };
        // all or nothing
        for name in &names {
            if self.rolled {
                return Err(TrackerError::InitiativeRolled(name.clone()));
            }
            self.check_unique(name)?;
        }
        for name in &names {
            self.add_combatant(Combatant::monster(name.as_str(), init_mod, hp)?)?;
        }
        Ok(names)
    }

    /// (Re)roll everyone and restart at round 1.
    pub fn roll_initiative(&mut self, dice: &mut Dice) -> Result<(), TrackerError> {
        let entries = roll_initiative_with(&self.combatants, self.modifiers, self.rules, dice)?;
        self.order = entries
            .iter()
            .map(|e| InitiativeSlot {
                position: e.position,
                total_score: e.total_score,
                roll: e.roll,
            })
            .collect();
        self.rolled = true;
        self.round = 1;
        self.turn = 0;
        info!(encounter = %self.name, "initiative rolled");
        Ok(())
    }

    /// Roll only for the newcomer and slot it into the existing order. Whoever
    /// is acting keeps the turn.
    pub fn add_reinforcement(
        &mut self,
        combatant: Combatant,
        dice: &mut Dice,
    ) -> Result<InitiativeSlot, TrackerError> {
        if !self.rolled {
            return Err(TrackerError::InitiativeNotRolled);
        }
        self.check_unique(&combatant.name)?;
        let position = self.combatants.len();
        let entry = roll_entry(position, &combatant, self.modifiers, self.rules, dice)?;
        let slot = InitiativeSlot {
            position,
            total_score: entry.total_score,
            roll: entry.roll,
        };
        let new_key = entry.key();
        let at = self
            .order
            .partition_point(|s| initiative_order(&self.key_of(s), &new_key).is_lt());
        self.combatants.push(combatant);
        self.order.insert(at, slot);
        if at <= self.turn && self.order.len() > 1 {
            self.turn += 1;
        }
        Ok(slot)
    }

    /// Slots with their combatants, first to act first. Empty until rolled.
    pub fn initiative(&self) -> impl Iterator<Item = (InitiativeSlot, &Combatant)> {
        self.order
            .iter()
            .map(|s| (*s, &self.combatants[s.position]))
    }

    pub fn damage(
        &mut self,
        name: &str,
        amount: i32,
        log: impl FnMut(String),
    ) -> Result<LifeStatus, TrackerError> {
        let c = self.find_mut(name)?;
        Ok(life::apply_damage(c, amount, log))
    }

    pub fn heal(
        &mut self,
        name: &str,
        amount: i32,
        log: impl FnMut(String),
    ) -> Result<LifeStatus, TrackerError> {
        let c = self.find_mut(name)?;
        Ok(life::heal(c, amount, log))
    }

    pub fn affect(
        &mut self,
        name: &str,
        effect: &str,
        log: impl FnMut(String),
    ) -> Result<(), TrackerError> {
        effects::affect(self.find_mut(name)?, effect, log)
    }

    pub fn defect(
        &mut self,
        name: &str,
        effect: &str,
        log: impl FnMut(String),
    ) -> Result<(), TrackerError> {
        effects::defect(self.find_mut(name)?, effect, log)
    }

    /// Combatants currently carrying at least one effect.
    pub fn affected(&self) -> Vec<&Combatant> {
        self.combatants
            .iter()
            .filter(|c| !c.status_effects.is_empty())
            .collect()
    }

    /// Whose turn it is.
    pub fn current(&self) -> Option<&Combatant> {
        self.order
            .get(self.turn)
            .map(|s| &self.combatants[s.position])
    }

    /// Move to the next slot, wrapping into a new round. Returns who is up.
    pub fn next_turn(&mut self) -> Option<&Combatant> {
        if self.order.is_empty() {
            return None;
        }
        self.turn += 1;
        if self.turn >= self.order.len() {
            self.turn = 0;
            self.round += 1;
        }
        self.current()
    }

    fn push(&mut self, combatant: Combatant) -> Result<(), TrackerError> {
        self.check_unique(&combatant.name)?;
        self.combatants.push(combatant);
        Ok(())
    }

    fn check_unique(&self, name: &str) -> Result<(), TrackerError> {
        if self.get(name).is_some() {
            return Err(TrackerError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Combatant, TrackerError> {
        let name = name.trim();
        self.combatants
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| TrackerError::UnknownCombatant(name.to_string()))
    }

    fn key_of(&self, slot: &InitiativeSlot) -> InitiativeKey {
        InitiativeKey {
            total_score: slot.total_score,
            initiative_modifier: self.combatants[slot.position].initiative_modifier,
            position: slot.position,
        }
    }
}

impl fmt::Display for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("-[{}]-", self.name);
        writeln!(f, "{:^width$}", title, width = TITLE_WIDTH)?;
        if self.rolled {
            for (slot, c) in self.initiative() {
                write_line(f, &slot.total_score.to_string(), c)?;
            }
        } else {
            for c in &self.combatants {
                write_line(f, "--", c)?;
            }
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, score: &str, c: &Combatant) -> fmt::Result {
    write!(f, "{} -> \"{}\" ({})", score, c.name, c.status())?;
    if !c.status_effects.is_empty() {
        write!(f, " [{}]", effects::summary(c))?;
    }
    writeln!(f)
}

/// 0 → "A", 25 → "Z", 26 → "AA", 27 → "AB", ...
pub fn letterer(mut index: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
