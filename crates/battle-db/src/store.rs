//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use battle_core::{Monster, MonsterDraft, MonsterId, StatUpdate};
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database, every schema version included
static MODELS: LazyLock<std::result::Result<Models, String>> = LazyLock::new(|| {
    let mut models = Models::new();
    models
        .define::<v1::StoredMonster>()
        .map_err(|e| e.to_string())?;
    models.define::<StoredMonster>().map_err(|e| e.to_string())?;
    Ok(models)
});

fn models() -> Result<&'static Models> {
    MODELS
        .as_ref()
        .map_err(|e| Error::Database(format!("model definition failed: {}", e)))
}

/// Database store for the monster roster.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Builder::new()
            .create(models()?, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        tracing::debug!("Opened roster store at {}", path.display());
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(models()?)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Add a monster, assigning the next free ID.
    pub fn create(&self, draft: MonsterDraft) -> Result<Monster> {
        draft.validate()?;
        if self.name_taken(&draft.name)? {
            return Err(Error::DuplicateKey(draft.name));
        }

        let id = self.next_id()?;
        let stored = StoredMonster::from_draft(id, draft);
        let rw = self.db.rw_transaction()?;
        rw.insert(stored.clone())?;
        rw.commit()?;

        let monster = stored.to_monster();
        tracing::info!("Monster '{}' added successfully ({})", monster.name, monster.id);
        Ok(monster)
    }

    /// Replace the stats of an existing monster.
    pub fn update(&self, id: MonsterId, update: StatUpdate) -> Result<Monster> {
        update.validate()?;
        let rw = self.db.rw_transaction()?;
        let old: StoredMonster = rw
            .get()
            .primary(id.raw())?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let mut monster = old.to_monster();
        monster.apply(&update);
        rw.update(old, StoredMonster::from(&monster))?;
        rw.commit()?;

        tracing::info!("Monster '{}' updated successfully", monster.name);
        Ok(monster)
    }

    /// Remove a monster, returning the removed record.
    pub fn delete(&self, id: MonsterId) -> Result<Monster> {
        let rw = self.db.rw_transaction()?;
        let stored: StoredMonster = rw
            .get()
            .primary(id.raw())?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        rw.remove(stored.clone())?;
        rw.commit()?;

        tracing::info!("Monster '{}' deleted successfully", stored.name);
        Ok(stored.to_monster())
    }

    /// Add every draft whose name is not in the roster yet.
    ///
    /// Returns the number of monsters added.
    pub fn seed(&self, drafts: impl IntoIterator<Item = MonsterDraft>) -> Result<usize> {
        let mut added = 0;
        for draft in drafts {
            if self.name_taken(&draft.name)? {
                tracing::debug!("Skipping seed '{}': already in roster", draft.name);
                continue;
            }
            self.create(draft)?;
            added += 1;
        }
        Ok(added)
    }

    /// Names are unique across both schema versions.
    fn name_taken(&self, name: &str) -> Result<bool> {
        let r = self.db.r_transaction()?;
        let current: Option<StoredMonster> = r
            .get()
            .secondary(StoredMonsterKey::name, name.to_string())?;
        if current.is_some() {
            return Ok(true);
        }
        let legacy: Option<v1::StoredMonster> = r
            .get()
            .secondary(v1::StoredMonsterKey::name, name.to_string())?;
        Ok(legacy.is_some())
    }

    fn next_id(&self) -> Result<u32> {
        let r = self.db.r_transaction()?;

        let scan = r.scan().primary::<StoredMonster>()?;
        let current = scan
            .all()?
            .map(|m| m.map(|m| m.id))
            .collect::<std::result::Result<Vec<u32>, _>>()?;

        let scan = r.scan().primary::<v1::StoredMonster>()?;
        let legacy = scan
            .all()?
            .map(|m| m.map(|m| m.id))
            .collect::<std::result::Result<Vec<u32>, _>>()?;

        let max = current.into_iter().chain(legacy).max().unwrap_or(0);
        max.checked_add(1)
            .ok_or_else(|| Error::Database("monster IDs exhausted".to_string()))
    }
}

impl battle_core::Roster for Store {
    type Error = Error;

    fn list(&self) -> Result<Vec<Monster>> {
        Store::list(self)
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pyro() -> MonsterDraft {
        MonsterDraft::new("Pyro", "Fire", 100, 30, 20)
    }

    fn aqua() -> MonsterDraft {
        MonsterDraft::new("Aqua", "Water", 100, 25, 15).with_speed(12)
    }

    #[test]
    fn test_models_define_both_versions() {
        let models = models().unwrap();
        let store = Store::in_memory().unwrap();
        assert!(std::ptr::eq(models, super::models().unwrap()));
        assert_eq!(store.legacy_rows().unwrap(), 0);
    }

    #[test]
    fn test_create_assigns_ids() {
        let store = Store::in_memory().unwrap();
        let a = store.create(pyro()).unwrap();
        let b = store.create(aqua()).unwrap();
        assert_eq!(a.id, MonsterId::new(1));
        assert_eq!(b.id, MonsterId::new(2));
        assert_eq!(a.speed, battle_core::DEFAULT_SPEED);
        assert_eq!(b.speed, 12);

        store.delete(a.id).unwrap();
        let c = store.create(MonsterDraft::new("Terra", "Earth", 120, 20, 25)).unwrap();
        assert_eq!(c.id, MonsterId::new(3));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let store = Store::in_memory().unwrap();
        store.create(pyro()).unwrap();
        let err = store.create(pyro()).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(name) if name == "Pyro"));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_invalid_draft_rejected() {
        let store = Store::in_memory().unwrap();
        let err = store
            .create(MonsterDraft::new("Ghost", "Shadow", 0, 10, 10))
            .unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
        let err = store.create(MonsterDraft::new("  ", "Fire", 10, 10, 10)).unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_update_and_delete() {
        let store = Store::in_memory().unwrap();
        let pyro = store.create(pyro()).unwrap();

        let updated = store
            .update(
                pyro.id,
                StatUpdate {
                    health: 150,
                    attack: 35,
                    defense: 25,
                    speed: None,
                },
            )
            .unwrap();
        assert_eq!(updated.health, 150);
        assert_eq!(updated.speed, battle_core::DEFAULT_SPEED);
        assert_eq!(store.get(pyro.id).unwrap(), Some(updated.clone()));

        let removed = store.delete(pyro.id).unwrap();
        assert_eq!(removed, updated);
        assert_eq!(store.get(pyro.id).unwrap(), None);
        assert!(store.find_by_name("Pyro").unwrap().is_none());
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let store = Store::in_memory().unwrap();
        let update = StatUpdate {
            health: 1,
            attack: 1,
            defense: 1,
            speed: Some(1),
        };
        assert!(matches!(
            store.update(MonsterId::new(7), update),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.delete(MonsterId::new(7)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_seed_skips_existing() {
        let store = Store::in_memory().unwrap();
        store.create(pyro()).unwrap();
        let added = store.seed(vec![pyro(), aqua()]).unwrap();
        assert_eq!(added, 1);
        assert_eq!(store.names().unwrap(), vec!["Pyro", "Aqua"]);
        assert_eq!(store.seed(vec![pyro(), aqua()]).unwrap(), 0);
    }

    #[test]
    fn test_store_is_a_roster() {
        use battle_core::{BattleConfig, BattleSession, GameRng};

        let store = Store::in_memory().unwrap();
        let pyro = store.create(pyro()).unwrap();
        store.create(aqua()).unwrap();

        let mut rng = GameRng::new(9);
        let session =
            BattleSession::start(&store, pyro, BattleConfig::default(), &mut rng).unwrap();
        assert_eq!(session.enemy().monster.name, "Aqua");
    }

    #[test]
    fn test_reopen_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("roster.db");
        {
            let store = Store::open(&path).unwrap();
            store.create(pyro()).unwrap();
            store.create(aqua()).unwrap();
        }
        let store = Store::open(&path).unwrap();
        let names: Vec<String> = store.list().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Pyro", "Aqua"]);
    }
}
