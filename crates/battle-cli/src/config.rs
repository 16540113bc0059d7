//! RON configuration for the game

use battle_core::BattleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG: &str = "battle.ron";

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Roster database file
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Directory for `monster-battle.log`
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Fixed RNG seed for opponent selection (wall clock when absent)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Turn policy and timings
    #[serde(default)]
    pub battle: BattleConfig,
    /// Sprite and sound locations
    #[serde(default)]
    pub assets: AssetConfig,
}

fn default_database() -> PathBuf {
    PathBuf::from("data/roster.db")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            log_dir: default_log_dir(),
            seed: None,
            battle: BattleConfig::default(),
            assets: AssetConfig::default(),
        }
    }
}

/// Asset locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetConfig {
    /// Directory holding `<name>.txt` sprites
    #[serde(default = "default_sprite_dir")]
    pub sprite_dir: PathBuf,
    /// Sprite used when a monster has none, relative to `sprite_dir`
    #[serde(default = "default_placeholder")]
    pub placeholder: PathBuf,
    /// Attack sound; the hit cue is disabled when it is missing
    #[serde(default = "default_sound")]
    pub sound: PathBuf,
}

fn default_sprite_dir() -> PathBuf {
    PathBuf::from("assets/sprites")
}

fn default_placeholder() -> PathBuf {
    PathBuf::from("placeholder.txt")
}

fn default_sound() -> PathBuf {
    PathBuf::from("assets/attack.wav")
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            sprite_dir: default_sprite_dir(),
            placeholder: default_placeholder(),
            sound: default_sound(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a RON string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit file, or `battle.ron` if present, or the defaults
    ///
    /// Only an explicitly named file is required to exist.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG).exists() => Self::load(DEFAULT_CONFIG),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.as_os_str().is_empty() {
            return Err(ConfigError::Validation("database path is empty".to_string()));
        }
        if self.battle.attack_cooldown_ms == 0 {
            return Err(ConfigError::Validation(
                "attack_cooldown_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the placeholder sprite
    pub fn placeholder_path(&self) -> PathBuf {
        self.assets.sprite_dir.join(&self.assets.placeholder)
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("validation error: {0}")]
    Validation(String),
}
