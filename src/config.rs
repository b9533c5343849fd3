//! Game configuration
//!
//! Read once at startup from a RON file. Every field has a default, so the
//! file may list only what it changes, or be absent altogether.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::ui::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const CONFIG_FILE: &str = "bullet-hell-chess.ron";
pub const CONFIG_ENV: &str = "BULLET_HELL_CHESS_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window_title: String,
    /// Initial window size in pixels; the canvas is letterboxed into it
    pub window_width: i32,
    pub window_height: i32,
    /// Directory holding `bg.png`, `board.png` and the piece sprites
    pub asset_dir: PathBuf,
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Shade the selected piece's candidate squares
    pub show_move_hints: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Bullet Hell Chess".to_string(),
            window_width: SCREEN_WIDTH as i32,
            window_height: SCREEN_HEIGHT as i32,
            asset_dir: PathBuf::from("assets/sprites/chessboard/chess_green"),
            log_filter: "info".to_string(),
            show_move_hints: true,
        }
    }
}

impl GameConfig {
    /// Config file location: `$BULLET_HELL_CHESS_CONFIG` or the default name
    pub fn path() -> PathBuf {
        config_path(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Load from the configured location
    pub fn load_default_location() -> Result<Self, GameError> {
        Self::load_or_default(Self::path())
    }

    /// Parse a config file. Missing or malformed files are errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Like `load`, but a missing file gives the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_ron(s: &str) -> Result<Self, GameError> {
        Ok(ron::from_str(s)?)
    }
}

fn config_path(from_env: Option<PathBuf>) -> PathBuf {
    from_env
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}
