//! Roster file schema

use crate::error::{Error, Result};
use battle_core::MonsterDraft;
use serde::{Deserialize, Serialize};

/// A roster file: `(monsters: [ ... ])`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub monsters: Vec<MonsterDef>,
}

/// Definition of one monster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterDef {
    /// Unique display name
    pub name: String,
    /// Type tag, also accepted as `type`
    #[serde(alias = "type")]
    pub kind: String,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default)]
    pub speed: Option<i32>,
}

impl MonsterDef {
    /// Validate and convert into a store draft
    pub fn into_draft(self) -> Result<MonsterDraft> {
        let draft = MonsterDraft {
            name: self.name,
            kind: self.kind,
            health: self.health,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
        };
        draft
            .validate()
            .map_err(|e| Error::InvalidSchema(e.to_string()))?;
        Ok(draft)
    }
}
