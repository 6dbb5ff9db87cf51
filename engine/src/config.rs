use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, Side};
use crate::encounter::Encounter;
use crate::error::TrackerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct CombatantConfig {
    pub name: String,
    #[serde(default)]
    pub init_mod: i32,
    pub hp: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<String>,
}

impl CombatantConfig {
    pub fn build(&self, side: Side) -> Result<Combatant, TrackerError> {
        let mut c = Combatant::new(self.name.as_str(), side, self.init_mod, self.hp)?;
        for effect in &self.effects {
            crate::effects::affect(&mut c, effect, |_| {})?;
        }
        Ok(c)
    }
}

/// `count` monsters of one kind sharing stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct MonsterGroupConfig {
    pub kind: String,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default)]
    pub init_mod: i32,
    pub hp: i32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct EncounterConfig {
    pub name: String,
    #[serde(default)]
    pub player_mod: i32,
    #[serde(default)]
    pub monster_mod: i32,
    #[serde(default)]
    pub players: Vec<CombatantConfig>,
    #[serde(default)]
    pub monsters: Vec<MonsterGroupConfig>,
    /// Fixed seed for reproducible rolls; omitted means entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl EncounterConfig {
    /// Players first, then monster groups, in file order. Not rolled yet.
    pub fn build(&self) -> Result<Encounter, TrackerError> {
        let mut enc = Encounter::new(self.name.as_str(), self.player_mod, self.monster_mod);
        for p in &self.players {
            enc.add_combatant(p.build(Side::Player)?)?;
        }
        for group in &self.monsters {
            enc.add_monsters(&group.kind, group.count, group.init_mod, group.hp)?;
        }
        Ok(enc)
    }
}
