//! Sprites and the hit sound cue
//!
//! Sprites are plain text files. A monster without its own sprite is drawn
//! with the placeholder; with no placeholder either the battle cannot be
//! shown and loading fails.

use crate::config::GameConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no sprite for '{name}' and no placeholder at {}", placeholder.display())]
    MissingSprite { name: String, placeholder: PathBuf },

    #[error("cannot read sprite {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A text sprite, one string per row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub rows: Vec<String>,
}

impl Sprite {
    pub fn parse(content: &str) -> Self {
        Self {
            rows: content.lines().map(|l| l.trim_end().to_string()).collect(),
        }
    }

    pub fn width(&self) -> u16 {
        self.rows
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16
    }

    pub fn height(&self) -> u16 {
        self.rows.len().min(u16::MAX as usize) as u16
    }
}

/// Resolved asset locations
#[derive(Debug, Clone)]
pub struct Assets {
    sprite_dir: PathBuf,
    placeholder: PathBuf,
    sound_enabled: bool,
}

impl Assets {
    /// Check the optional sound and remember where sprites live
    pub fn new(config: &GameConfig) -> Self {
        let sound = &config.assets.sound;
        let sound_enabled = sound.is_file();
        if !sound_enabled {
            tracing::warn!(
                "Sound file {} not found, hit sound disabled",
                sound.display()
            );
        }
        Self {
            sprite_dir: config.assets.sprite_dir.clone(),
            placeholder: config.placeholder_path(),
            sound_enabled,
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Sprite file of a monster: lowercase name, spaces as underscores
    pub fn sprite_path(&self, name: &str) -> PathBuf {
        let stem: String = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        self.sprite_dir.join(format!("{}.txt", stem))
    }

    /// Load the sprite of a monster, falling back to the placeholder
    pub fn sprite(&self, name: &str) -> Result<Sprite, AssetError> {
        let path = self.sprite_path(name);
        if path.is_file() {
            return read_sprite(&path);
        }

        tracing::warn!("Image for {} not found. Using placeholder.", name);
        if self.placeholder.is_file() {
            return read_sprite(&self.placeholder);
        }

        tracing::error!(
            "Placeholder image {} not found",
            self.placeholder.display()
        );
        Err(AssetError::MissingSprite {
            name: name.to_string(),
            placeholder: self.placeholder.clone(),
        })
    }

    /// Audible cue for a landed hit, if the sound asset exists
    pub fn play_hit(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.sound_enabled {
            out.write_all(b"\x07")?;
        }
        Ok(())
    }
}

fn read_sprite(path: &Path) -> Result<Sprite, AssetError> {
    fs::read_to_string(path)
        .map(|content| Sprite::parse(&content))
        .map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })
}
