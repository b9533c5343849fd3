//! Sprite assets
//!
//! - **Sprite**: a decoded RGBA bitmap with its pixel size
//! - **SpriteLibrary**: per-directory decode cache used while building scenes
//! - **SpriteFiles**: raw file bytes fetched asynchronously at startup

mod sprite;
mod sprite_files;
mod sprite_library;

pub use sprite::Sprite;
pub use sprite_files::SpriteFiles;
pub use sprite_library::SpriteLibrary;
