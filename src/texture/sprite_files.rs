//! Sprite files fetched before the first scene is built
//!
//! Scene generators are synchronous, but on the web the filesystem is only
//! reachable through macroquad's async loader. The frame loop fetches the
//! raw bytes once at startup; every later scene build decodes from them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::GameError;

#[derive(Debug, Clone, Default)]
pub struct SpriteFiles {
    files: HashMap<PathBuf, Arc<Vec<u8>>>,
}

impl SpriteFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `names` from `dir` through macroquad's file loader
    pub async fn fetch(dir: &Path, names: &[String]) -> Result<Self, GameError> {
        let mut files = Self::new();
        for name in names {
            let path = dir.join(name);
            let bytes = macroquad::file::load_file(&path.to_string_lossy())
                .await
                .map_err(|e| GameError::Asset {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            files.insert(path, bytes);
        }
        log::info!("fetched {} sprite files from {}", files.len(), dir.display());
        Ok(files)
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), Arc::new(bytes));
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(|bytes| bytes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut files = SpriteFiles::new();
        assert!(files.is_empty());
        files.insert("sprites/bg.png", vec![1, 2, 3]);
        assert_eq!(files.get(Path::new("sprites/bg.png")), Some(&[1u8, 2, 3][..]));
        assert_eq!(files.get(Path::new("sprites/board.png")), None);

        // Clones share the bytes
        let copy = files.clone();
        assert_eq!(copy.len(), 1);
    }
}
