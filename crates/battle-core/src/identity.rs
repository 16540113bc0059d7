//! Identity types for monsters and combatants

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a roster record
///
/// Opponent selection compares monsters by this id, never by their stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonsterId(pub u32);

impl MonsterId {
    /// Create a new monster ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for MonsterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "monster:{}", self.0)
    }
}

impl From<u32> for MonsterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// One of the two combatants in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The monster the player picked
    Player,
    /// The randomly sampled opponent
    Enemy,
}

impl Side {
    /// The other combatant
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}
