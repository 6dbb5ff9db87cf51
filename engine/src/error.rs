use thiserror::Error;

/// Everything the tracker can refuse to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("combatant name must not be empty")]
    EmptyName,
    #[error("effect label must not be empty")]
    EmptyEffect,
    #[error("invalid die d{sides}: a die needs at least 2 sides")]
    InvalidDie { sides: i32 },
    #[error("scripted dice ran out after {used} rolls")]
    DiceExhausted { used: usize },
    #[error("a combatant named '{0}' is already in this encounter")]
    DuplicateName(String),
    #[error("no combatant named '{0}'")]
    UnknownCombatant(String),
    #[error("'{name}' is not affected by '{effect}'")]
    UnknownEffect { name: String, effect: String },
    #[error("'{0}' is not a player character")]
    NotAPlayer(String),
    #[error("initiative already rolled; add '{0}' as a reinforcement")]
    InitiativeRolled(String),
    #[error("initiative has not been rolled yet")]
    InitiativeNotRolled,
    #[error("no active encounter")]
    NoEncounter,
}
