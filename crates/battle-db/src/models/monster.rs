//! Monster models for database storage.

use battle_core::{Monster, MonsterDraft, MonsterId, DEFAULT_SPEED};

pub mod v1 {
    use native_db::*;
    use native_model::{native_model, Model};
    use serde::{Deserialize, Serialize};

    /// Stored monster before the speed attribute existed.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[native_model(id = 1, version = 1)]
    #[native_db]
    pub struct StoredMonster {
        /// Primary key - monster ID.
        #[primary_key]
        pub id: u32,
        /// Display name, unique within the roster.
        #[secondary_key(unique)]
        pub name: String,
        /// Type tag (Fire, Water, ...).
        pub kind: String,
        pub health: i32,
        pub attack: i32,
        pub defense: i32,
    }
}

pub mod v2 {
    use super::v1;
    use battle_core::DEFAULT_SPEED;
    use native_db::*;
    use native_model::{native_model, Model};
    use serde::{Deserialize, Serialize};

    /// Stored monster with speed.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[native_model(id = 1, version = 2, from = v1::StoredMonster)]
    #[native_db]
    pub struct StoredMonster {
        /// Primary key - monster ID.
        #[primary_key]
        pub id: u32,
        /// Display name, unique within the roster.
        #[secondary_key(unique)]
        pub name: String,
        /// Type tag (Fire, Water, ...).
        pub kind: String,
        pub health: i32,
        pub attack: i32,
        pub defense: i32,
        pub speed: i32,
    }

    impl From<v1::StoredMonster> for StoredMonster {
        fn from(old: v1::StoredMonster) -> Self {
            Self {
                id: old.id,
                name: old.name,
                kind: old.kind,
                health: old.health,
                attack: old.attack,
                defense: old.defense,
                speed: DEFAULT_SPEED,
            }
        }
    }

    impl From<StoredMonster> for v1::StoredMonster {
        fn from(new: StoredMonster) -> Self {
            Self {
                id: new.id,
                name: new.name,
                kind: new.kind,
                health: new.health,
                attack: new.attack,
                defense: new.defense,
            }
        }
    }
}

impl v2::StoredMonster {
    /// Create from a validated draft and a freshly assigned ID.
    pub fn from_draft(id: u32, draft: MonsterDraft) -> Self {
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

    /// Convert to a battle-core Monster.
    pub fn to_monster(&self) -> Monster {
        Monster {
            id: MonsterId::new(self.id),
            name: self.name.clone(),
            kind: self.kind.clone(),
            health: self.health,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
        }
    }
}

impl From<&Monster> for v2::StoredMonster {
    fn from(monster: &Monster) -> Self {
        Self {
            id: monster.id.raw(),
            name: monster.name.clone(),
            kind: monster.kind.clone(),
            health: monster.health,
            attack: monster.attack,
            defense: monster.defense,
            speed: monster.speed,
        }
    }
}
