use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod combatant;
pub mod config;
pub mod content;
pub mod effects;
pub mod encounter;
pub mod error;
pub mod initiative;
pub mod life;
pub mod session;

pub use combatant::{Combatant, Side};
pub use encounter::{Encounter, InitiativeSlot};
pub use error::TrackerError;
pub use initiative::{
    InitiativeEntry, InitiativeKey, InitiativeRules, SituationalModifiers, initiative_order,
    roll_initiative, roll_initiative_with,
};
pub use life::LifeStatus;
pub use session::Session;

enum Source {
    Seeded(ChaCha8Rng),
    Scripted { rolls: VecDeque<i32>, used: usize },
}

/// The only source of randomness in the tracker. Always passed explicitly.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    /// Seeded from the thread RNG; what the tracker uses outside of tests.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// Hands out `rolls` in order regardless of die size, then fails with
    /// [`TrackerError::DiceExhausted`].
    pub fn from_scripted(rolls: Vec<i32>) -> Self {
        Self {
            source: Source::Scripted { rolls: rolls.into(), used: 0 },
        }
    }

    pub fn roll(&mut self, sides: i32) -> Result<i32, TrackerError> {
        if sides < 2 {
            return Err(TrackerError::InvalidDie { sides });
        }
        match &mut self.source {
            Source::Seeded(rng) => Ok(rng.gen_range(1..=sides)),
            Source::Scripted { rolls, used } => {
                let roll = rolls
                    .pop_front()
                    .ok_or(TrackerError::DiceExhausted { used: *used })?;
                *used += 1;
                Ok(roll)
            }
        }
    }

    pub fn d20(&mut self) -> Result<i32, TrackerError> {
        self.roll(20)
    }

    pub fn d12(&mut self) -> Result<i32, TrackerError> {
        self.roll(12)
    }

    pub fn d10(&mut self) -> Result<i32, TrackerError> {
        self.roll(10)
    }

    pub fn d8(&mut self) -> Result<i32, TrackerError> {
        self.roll(8)
    }

    pub fn d6(&mut self) -> Result<i32, TrackerError> {
        self.roll(6)
    }

    pub fn d4(&mut self) -> Result<i32, TrackerError> {
        self.roll(4)
    }

    pub fn d2(&mut self) -> Result<i32, TrackerError> {
        self.roll(2)
    }
}
