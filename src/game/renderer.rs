//! Render layers and drawing surfaces
//!
//! Components draw through the `Canvas` trait in logical canvas units.
//! `ScreenCanvas` is the macroquad-backed surface used by the frame loop;
//! it owns the GPU textures and maps everything through the viewport.

use std::collections::HashMap;

use macroquad::color::{Color, WHITE};
use macroquad::math::vec2;
use macroquad::shapes::{draw_rectangle, draw_rectangle_lines};
use macroquad::texture::{draw_texture_ex, DrawTextureParams, FilterMode, Texture2D};

use crate::texture::Sprite;
use crate::ui::{Rect, Viewport};

/// Draw order buckets. Every frame draws each layer in `ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderLayer {
    #[default]
    Background,
    Foreground,
    ForegroundObject,
    Ui,
}

impl RenderLayer {
    /// Fixed per-frame draw order, back to front
    pub const ORDER: [RenderLayer; 4] = [
        RenderLayer::Background,
        RenderLayer::Foreground,
        RenderLayer::ForegroundObject,
        RenderLayer::Ui,
    ];
}

/// Placement of a sprite: top-left corner, size, and rotation in turns
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawParams {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub angle: f32,
}

/// A surface that sprites and overlays are drawn onto
pub trait Canvas {
    fn draw_sprite(&mut self, sprite: &Sprite, params: DrawParams);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color);
}

/// The window, via macroquad
pub struct ScreenCanvas {
    viewport: Viewport,
    /// GPU textures keyed by sprite key
    textures: HashMap<String, Texture2D>,
}

impl ScreenCanvas {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::IDENTITY,
            textures: HashMap::new(),
        }
    }

    /// Set the viewport for this frame (call after reading window size)
    pub fn begin_frame(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Upload a sprite's pixels on first use
    fn texture_for(&mut self, sprite: &Sprite) -> Texture2D {
        self.textures
            .entry(sprite.key().to_string())
            .or_insert_with(|| {
                let texture = Texture2D::from_rgba8(
                    sprite.width() as u16,
                    sprite.height() as u16,
                    sprite.pixels(),
                );
                // Pixel art: keep edges crisp when scaled up
                texture.set_filter(FilterMode::Nearest);
                texture
            })
            .clone()
    }

    fn screen_rect(&self, rect: Rect) -> Rect {
        let (x, y) = self.viewport.to_screen(rect.x, rect.y);
        Rect::new(x, y, rect.w * self.viewport.scale, rect.h * self.viewport.scale)
    }
}

impl Default for ScreenCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for ScreenCanvas {
    fn draw_sprite(&mut self, sprite: &Sprite, params: DrawParams) {
        let texture = self.texture_for(sprite);
        let (x, y) = self.viewport.to_screen(params.x, params.y);
        let scale = self.viewport.scale;
        draw_texture_ex(
            &texture,
            x,
            y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(params.w * scale, params.h * scale)),
                rotation: params.angle * std::f32::consts::TAU,
                pivot: Some(vec2(x, y)),
                ..Default::default()
            },
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let r = self.screen_rect(rect);
        draw_rectangle(r.x, r.y, r.w, r.h, color);
    }

    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let r = self.screen_rect(rect);
        draw_rectangle_lines(r.x, r.y, r.w, r.h, thickness * self.viewport.scale, color);
    }
}
