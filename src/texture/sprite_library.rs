//! Sprite library - decode each file once per scene build
//!
//! A full board loads sixteen pawns from two files; the library hands out
//! clones sharing one decoded bitmap instead of decoding per piece.
//! Files already fetched into `SpriteFiles` are decoded from memory,
//! anything else is read from disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{Sprite, SpriteFiles};
use crate::error::GameError;

/// Sprites loaded from a base directory, keyed by relative file name
#[derive(Debug, Default)]
pub struct SpriteLibrary {
    sprites: HashMap<PathBuf, Sprite>,
    base_dir: PathBuf,
    files: SpriteFiles,
}

impl SpriteLibrary {
    /// Create a library reading from `base_dir`
    #[cfg(test)]
    pub fn with_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_files(base_dir, SpriteFiles::new())
    }

    /// Create a library that prefers prefetched bytes over the disk
    pub fn with_files(base_dir: impl Into<PathBuf>, files: SpriteFiles) -> Self {
        Self {
            sprites: HashMap::new(),
            base_dir: base_dir.into(),
            files,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get a sprite, decoding it on first use
    pub fn load(&mut self, file_name: impl AsRef<Path>) -> Result<Sprite, GameError> {
        let path = self.base_dir.join(file_name);
        if let Some(sprite) = self.sprites.get(&path) {
            return Ok(sprite.clone());
        }
        let sprite = match self.files.get(&path) {
            Some(bytes) => Sprite::from_bytes(&path, bytes)?,
            None => Sprite::from_path(&path)?,
        };
        log::debug!("loaded sprite {} ({}x{})", path.display(), sprite.width(), sprite.height());
        self.sprites.insert(path, sprite.clone());
        Ok(sprite)
    }

    /// Number of distinct files decoded so far
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
