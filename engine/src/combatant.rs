use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::life::{LifeStatus, classify};

/// Which situational modifier a combatant takes, and which death rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Monster,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Monster => f.write_str("monster"),
        }
    }
}

/// One participant in an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combatant {
    pub name: String,
    pub side: Side,
    pub initiative_modifier: i32,
    pub max_hp: i32,
    pub current_hp: i32,
    /// Free-text labels in the order they were applied.
    pub status_effects: Vec<String>,
}

impl Combatant {
    /// Starts at full hit points with no effects. The name is trimmed and must
    /// not end up empty.
    pub fn new(
        name: impl Into<String>,
        side: Side,
        initiative_modifier: i32,
        max_hp: i32,
    ) -> Result<Self, TrackerError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        Ok(Self {
            name,
            side,
            initiative_modifier,
            max_hp,
            current_hp: max_hp,
            status_effects: Vec::new(),
        })
    }

    pub fn player(
        name: impl Into<String>,
        initiative_modifier: i32,
        max_hp: i32,
    ) -> Result<Self, TrackerError> {
        Self::new(name, Side::Player, initiative_modifier, max_hp)
    }

    pub fn monster(
        name: impl Into<String>,
        initiative_modifier: i32,
        max_hp: i32,
    ) -> Result<Self, TrackerError> {
        Self::new(name, Side::Monster, initiative_modifier, max_hp)
    }

    pub fn is_player(&self) -> bool {
        self.side == Side::Player
    }

    pub fn status(&self) -> LifeStatus {
        classify(self.side, self.current_hp, self.max_hp)
    }

    /// A copy at full hit points with effects cleared, for the next encounter.
    pub fn fresh(&self) -> Self {
        Self {
            current_hp: self.max_hp,
            status_effects: Vec::new(),
            ..self.clone()
        }
    }
}
