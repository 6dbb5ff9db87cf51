use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, Side};

/// Players at or below this many hit points are dead rather than dying.
pub const PLAYER_DEATH_THRESHOLD: i32 = -10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStatus {
    Healthy,
    /// At or below half of maximum hit points.
    Bloodied,
    /// Exactly 0 HP (players only).
    Disabled,
    /// Below 0 but above the death threshold (players only).
    Dying,
    Dead,
}

impl LifeStatus {
    pub fn label(self) -> &'static str {
        match self {
            LifeStatus::Healthy => "healthy",
            LifeStatus::Bloodied => "bloodied",
            LifeStatus::Disabled => "disabled",
            LifeStatus::Dying => "dying",
            LifeStatus::Dead => "dead",
        }
    }

    /// Out of the fight, one way or another.
    pub fn is_down(self) -> bool {
        matches!(
            self,
            LifeStatus::Disabled | LifeStatus::Dying | LifeStatus::Dead
        )
    }
}

impl fmt::Display for LifeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Monsters die at 0; players go disabled at 0, dying below, dead at the
/// threshold.
pub fn classify(side: Side, current_hp: i32, max_hp: i32) -> LifeStatus {
    if current_hp <= 0 {
        return match side {
            Side::Monster => LifeStatus::Dead,
            Side::Player if current_hp <= PLAYER_DEATH_THRESHOLD => LifeStatus::Dead,
            Side::Player if current_hp < 0 => LifeStatus::Dying,
            Side::Player => LifeStatus::Disabled,
        };
    }
    if current_hp * 2 <= max_hp {
        LifeStatus::Bloodied
    } else {
        LifeStatus::Healthy
    }
}

/// Subtract `dmg` with no floor. Returns the status afterwards.
pub fn apply_damage(
    combatant: &mut Combatant,
    dmg: i32,
    mut log: impl FnMut(String),
) -> LifeStatus {
    let before_hp = combatant.current_hp;
    let before = combatant.status();
    combatant.current_hp -= dmg;
    let after = combatant.status();
    log(format!(
        "[DMG][{}] {} → {} (−{})",
        combatant.name, before_hp, combatant.current_hp, dmg
    ));
    if after != before {
        log(format!("[STATE][{}] {} → {}", combatant.name, before, after));
    }
    after
}

/// Add `amount` with no ceiling; overhealing past max is kept.
pub fn heal(combatant: &mut Combatant, amount: i32, mut log: impl FnMut(String)) -> LifeStatus {
    let before_hp = combatant.current_hp;
    let before = combatant.status();
    combatant.current_hp += amount;
    let after = combatant.status();
    log(format!(
        "[HEAL][{}] +{} HP ({} → {})",
        combatant.name, amount, before_hp, combatant.current_hp
    ));
    if after != before {
        log(format!("[STATE][{}] {} → {}", combatant.name, before, after));
    }
    after
}
