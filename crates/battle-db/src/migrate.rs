//! The speed migration.
//!
//! Version 1 rows carry no speed. Migrating moves every one of them to the
//! version 2 table with [`battle_core::DEFAULT_SPEED`]. Running it again
//! finds no version 1 rows and changes nothing.

use crate::error::Result;
use crate::models::*;
use crate::store::Store;
use std::fmt;

/// What a migration run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationReport {
    /// Rows were moved to the current schema.
    Applied { rows: usize },
    /// Nothing to do: the speed attribute already exists on every row.
    AlreadyApplied,
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationReport::Applied { rows } => {
                write!(f, "Speed attribute added to {} monsters", rows)
            }
            MigrationReport::AlreadyApplied => write!(f, "Speed attribute already exists"),
        }
    }
}

impl Store {
    /// Add the speed attribute to legacy rows.
    ///
    /// Rows added since the last migration may already sit in the current
    /// table next to legacy ones; both stay listed afterwards.
    pub fn migrate_speed(&self) -> Result<MigrationReport> {
        if self.legacy_rows()? == 0 {
            tracing::info!("Speed attribute already exists");
            return Ok(MigrationReport::AlreadyApplied);
        }

        let rows = match self.migrate_rows() {
            Ok(rows) => rows,
            Err(err) => {
                tracing::error!("Speed migration failed: {}", err);
                return Err(err);
            }
        };

        tracing::info!("Speed attribute added to {} monsters", rows);
        Ok(MigrationReport::Applied { rows })
    }

    /// Move every legacy row in one transaction; nothing is written on error.
    fn migrate_rows(&self) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        let mut legacy: Vec<v1::StoredMonster> = Vec::new();
        {
            // The legacy table must be closed again before rows are removed
            let scan = rw.scan().primary::<v1::StoredMonster>()?;
            for row in scan.all()? {
                legacy.push(row?);
            }
        }

        for old in &legacy {
            rw.remove(old.clone())?;
            rw.insert(StoredMonster::from(old.clone()))?;
            tracing::debug!("Migrated '{}' (monster:{})", old.name, old.id);
        }
        rw.commit()?;
        Ok(legacy.len())
    }
}
