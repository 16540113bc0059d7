//! RON roster loader

use crate::error::{Error, Result};
use crate::schema::RosterFile;
use battle_core::MonsterDraft;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Loaded monster drafts, keyed by name in load order
#[derive(Debug, Default)]
pub struct RosterDefs {
    pub monsters: IndexMap<String, MonsterDraft>,
}

impl RosterDefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&MonsterDraft> {
        self.monsters.get(name)
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    /// Drafts in the order they were loaded
    pub fn into_drafts(self) -> Vec<MonsterDraft> {
        self.monsters.into_values().collect()
    }
}

/// Loader for RON roster files
pub struct RosterLoader {
    defs: RosterDefs,
}

impl RosterLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: RosterDefs::new(),
        }
    }

    /// Load monsters from a RON string
    pub fn load_str(&mut self, content: &str) -> Result<usize> {
        let file: RosterFile = ron::from_str(content)?;
        let count = file.monsters.len();
        for def in file.monsters {
            let draft = def.into_draft()?;
            if self.defs.monsters.contains_key(&draft.name) {
                return Err(Error::DuplicateDefinition(draft.name));
            }
            self.defs.monsters.insert(draft.name.clone(), draft);
        }
        Ok(count)
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let count = self.load_str(&content)?;
        tracing::debug!("Loaded {} monsters from {}", count, path.display());
        Ok(count)
    }

    /// Load all RON files from a directory, recursing into subdirectories
    ///
    /// Entries are visited in name order so the result does not depend on
    /// the filesystem.
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        let mut count = 0;
        for file_path in entries {
            if file_path.is_dir() {
                count += self.load_directory(&file_path)?;
            } else if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                count += self.load_file(&file_path)?;
            }
        }

        Ok(count)
    }

    /// Load a file or every file under a directory
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        if path.is_dir() {
            self.load_directory(path)
        } else {
            self.load_file(path)
        }
    }

    /// Finish loading and return the definitions
    pub fn finish(self) -> RosterDefs {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &RosterDefs {
        &self.defs
    }
}

impl Default for RosterLoader {
    fn default() -> Self {
        Self::new()
    }
}
