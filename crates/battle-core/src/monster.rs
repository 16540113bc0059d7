//! Monster records as seen by the battle core

use crate::error::{Error, Result};
use crate::MonsterId;
use serde::{Deserialize, Serialize};

/// Speed given to records that predate the speed attribute
pub const DEFAULT_SPEED: i32 = 10;

/// A roster record
///
/// The battle core only ever reads these; the roster store owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    /// Display name, unique within the roster
    pub name: String,
    /// Categorical tag such as "Fire" or "Water" (informational only)
    pub kind: String,
    /// Maximum and starting health pool
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Only consulted by the speed-gated turn policies
    pub speed: i32,
}

impl Monster {
    /// Build a monster from a draft and an assigned id
    pub fn from_draft(id: MonsterId, draft: MonsterDraft) -> Self {
        Self {
            id,
            name: draft.name,
            kind: draft.kind,
            health: draft.health,
            attack: draft.attack,
            defense: draft.defense,
            speed: draft.speed.unwrap_or(DEFAULT_SPEED),
        }
    }

    /// Whether this record may be offered as a battle participant
    pub fn is_selectable(&self) -> bool {
        self.health > 0
    }

    /// Apply a stat update in place
    pub fn apply(&mut self, update: &StatUpdate) {
        self.health = update.health;
        self.attack = update.attack;
        self.defense = update.defense;
        if let Some(speed) = update.speed {
            self.speed = speed;
        }
    }
}

/// Input for creating a new roster record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterDraft {
    pub name: String,
    pub kind: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Falls back to [`DEFAULT_SPEED`] when absent
    #[serde(default)]
    pub speed: Option<i32>,
}

impl MonsterDraft {
    /// Create a draft with the default speed
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        health: i32,
        attack: i32,
        defense: i32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            health,
            attack,
            defense,
            speed: None,
        }
    }

    /// Set an explicit speed
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Check the draft before it reaches the store
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidMonster("name must not be empty".to_string()));
        }
        if self.kind.trim().is_empty() {
            return Err(Error::InvalidMonster(format!(
                "{}: type must not be empty",
                self.name
            )));
        }
        check_stats(&self.name, self.health, self.attack, self.defense, self.speed)
    }
}

/// New stats for an existing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatUpdate {
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    /// Left unchanged when absent
    #[serde(default)]
    pub speed: Option<i32>,
}

impl StatUpdate {
    /// Check the update before it reaches the store
    pub fn validate(&self) -> Result<()> {
        check_stats("update", self.health, self.attack, self.defense, self.speed)
    }
}

fn check_stats(
    label: &str,
    health: i32,
    attack: i32,
    defense: i32,
    speed: Option<i32>,
) -> Result<()> {
    let fields = [
        ("health", Some(health)),
        ("attack", Some(attack)),
        ("defense", Some(defense)),
        ("speed", speed),
    ];
    for (field, value) in fields {
        if let Some(v) = value {
            if v <= 0 {
                return Err(Error::InvalidMonster(format!(
                    "{}: {} must be positive, got {}",
                    label, field, v
                )));
            }
        }
    }
    Ok(())
}
