//! Common query patterns for the roster.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use battle_core::{Monster, MonsterId};

impl Store {
    /// All monsters, ordered by ID.
    pub fn list(&self) -> Result<Vec<Monster>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredMonster>()?;
        let iter = scan.all()?;
        let stored: std::result::Result<Vec<StoredMonster>, _> = iter.collect();
        let mut stored = stored.map_err(|e| Error::Database(e.to_string()))?;
        stored.sort_by_key(|m| m.id);
        Ok(stored.iter().map(StoredMonster::to_monster).collect())
    }

    /// Load a monster by ID.
    pub fn get(&self, id: MonsterId) -> Result<Option<Monster>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredMonster> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_monster()))
    }

    /// Load a monster by its unique name.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Monster>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredMonster> = r
            .get()
            .secondary(StoredMonsterKey::name, name.to_string())?;
        Ok(stored.map(|s| s.to_monster()))
    }

    /// Names of all monsters, ordered by ID.
    pub fn names(&self) -> Result<Vec<String>> {
        Ok(self.list()?.into_iter().map(|m| m.name).collect())
    }

    /// Number of monsters visible to the game.
    pub fn count(&self) -> Result<usize> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredMonster>()?;
        let iter = scan.all()?;
        Ok(iter.count())
    }

    /// Number of rows still stored in the pre-speed schema.
    pub fn legacy_rows(&self) -> Result<usize> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<v1::StoredMonster>()?;
        let iter = scan.all()?;
        Ok(iter.count())
    }
}
