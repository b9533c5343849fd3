//! Sprites - decoded bitmaps that know how to place themselves
//!
//! Pixel data is decoded once with the `image` crate and shared between
//! clones. GPU textures are created lazily by the drawing surface, keyed
//! by the sprite's key, so decoding never needs a graphics context.

use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::error::GameError;
use crate::game::renderer::{Canvas, DrawParams};

/// A decoded RGBA bitmap plus the key its texture is cached under
#[derive(Debug, Clone)]
pub struct Sprite {
    key: String,
    image: Arc<RgbaImage>,
}

impl Sprite {
    /// Decode an image file. Missing or undecodable files are errors.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| GameError::Sprite {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(Self {
            key: path.to_string_lossy().into_owned(),
            image: Arc::new(image),
        })
    }

    /// Decode an in-memory image file. `path` names it for the cache key
    /// and error messages.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<Self, GameError> {
        let path = path.as_ref();
        let image = image::load_from_memory(bytes)
            .map_err(|source| GameError::Sprite {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Ok(Self {
            key: path.to_string_lossy().into_owned(),
            image: Arc::new(image),
        })
    }

    /// Wrap already-decoded pixels
    #[cfg(test)]
    pub fn from_image(key: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            key: key.into(),
            image: Arc::new(image),
        }
    }

    /// Texture cache key (the source path for file sprites)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw RGBA8 pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Source size in pixels
    pub fn size(&self) -> (f32, f32) {
        (self.image.width() as f32, self.image.height() as f32)
    }

    /// Draw stretched to `w`x`h` at `(x, y)`, rotated by `angle` turns
    /// around the top-left corner.
    pub fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, w: f32, h: f32, angle: f32) {
        canvas.draw_sprite(self, DrawParams { x, y, w, h, angle });
    }
}
