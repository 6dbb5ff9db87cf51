use std::fmt;

use crate::Dice;
use crate::combatant::Combatant;
use crate::encounter::Encounter;
use crate::error::TrackerError;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A night of play: the party roster plus every encounter run so far.
#[derive(Debug, Clone)]
pub struct Session {
    pub name: String,
    pub date: String,
    players: Vec<Combatant>,
    encounters: Vec<Encounter>,
}

impl Session {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            players: Vec::new(),
            encounters: Vec::new(),
        }
    }

    /// `Unnamed Session [xxxxx]` with letters drawn from `dice`.
    pub fn unnamed(date: impl Into<String>, dice: &mut Dice) -> Result<Self, TrackerError> {
        let tag = random_tag(dice, 5)?;
        Ok(Self::new(format!("Unnamed Session [{}]", tag), date))
    }

    pub fn players(&self) -> &[Combatant] {
        &self.players
    }

    pub fn add_player(&mut self, player: Combatant) -> Result<(), TrackerError> {
        if !player.is_player() {
            return Err(TrackerError::NotAPlayer(player.name));
        }
        if self.players.iter().any(|p| p.name == player.name) {
            return Err(TrackerError::DuplicateName(player.name));
        }
        self.players.push(player);
        Ok(())
    }

    /// Start a new encounter with a fresh copy of the party. It becomes the
    /// current one.
    pub fn add_encounter(
        &mut self,
        name: impl Into<String>,
        player_mod: i32,
        monster_mod: i32,
    ) -> Result<&mut Encounter, TrackerError> {
        let mut encounter = Encounter::new(name, player_mod, monster_mod);
        for p in &self.players {
            encounter.add_combatant(p.fresh())?;
        }
        self.encounters.push(encounter);
        let idx = self.encounters.len() - 1;
        Ok(&mut self.encounters[idx])
    }

    /// Adopt an already built encounter as the current one.
    pub fn push_encounter(&mut self, encounter: Encounter) {
        self.encounters.push(encounter);
    }

    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounters.last()
    }

    pub fn encounter_mut(&mut self) -> Result<&mut Encounter, TrackerError> {
        self.encounters.last_mut().ok_or(TrackerError::NoEncounter)
    }

    /// Title-cased name with spaces dropped, plus `.txt`.
    pub fn default_filename(&self) -> String {
        format!("{}.txt", title_case(&self.name).replace(' ', ""))
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.date)?;
        for enc in &self.encounters {
            write!(f, "{}", enc)?;
        }
        Ok(())
    }
}

fn random_tag(dice: &mut Dice, len: usize) -> Result<String, TrackerError> {
    let sides = LETTERS.len() as i32;
    let mut tag = String::with_capacity(len);
    for _ in 0..len {
        let idx = (dice.roll(sides)? - 1).clamp(0, sides - 1);
        tag.push(LETTERS[idx as usize] as char);
    }
    Ok(tag)
}

/// Uppercase the first letter of every word, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
