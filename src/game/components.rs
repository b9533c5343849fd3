//! Core Components
//!
//! Placement and appearance. Both are plain data: `Worldly` says where an
//! actor is, `Drawable` says what it looks like and which layer it is on.

use super::renderer::{Canvas, RenderLayer};
use crate::texture::Sprite;
use crate::ui::Rect;

/// Position, size and rotation in logical canvas units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Worldly {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    /// Rotation in turns (1.0 = full circle)
    angle: f32,
}

impl Worldly {
    pub fn new(x: f32, y: f32, w: f32, h: f32, angle: f32) -> Self {
        Self { x, y, w, h, angle }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn scale(&self) -> (f32, f32) {
        (self.w, self.h)
    }

    pub fn set_scale(&mut self, w: f32, h: f32) {
        self.w = w;
        self.h = h;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Axis-aligned box at the current position (rotation ignored)
    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// A sprite on a render layer
#[derive(Debug, Clone)]
pub struct Drawable {
    sprite: Sprite,
    layer: RenderLayer,
    active: bool,
}

impl Drawable {
    /// Active drawable on the given layer
    pub fn new(sprite: Sprite, layer: RenderLayer) -> Self {
        Self {
            sprite,
            layer,
            active: true,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn layer(&self) -> RenderLayer {
        self.layer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether this drawable takes part in drawing `layer`
    pub fn draws_on(&self, layer: RenderLayer) -> bool {
        self.active && self.layer == layer
    }

    /// Draw the sprite stretched over the worldly's box
    pub fn draw(&self, canvas: &mut dyn Canvas, worldly: &Worldly) {
        let (x, y) = worldly.position();
        let (w, h) = worldly.scale();
        self.sprite.draw(canvas, x, y, w, h, worldly.angle());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::renderer::testing::{DrawCall, RecordingCanvas};
    use crate::game::renderer::DrawParams;
    use image::RgbaImage;

    #[test]
    fn test_scale_is_size_not_position() {
        let mut w = Worldly::new(10.0, 20.0, 30.0, 40.0, 0.0);
        assert_eq!(w.scale(), (30.0, 40.0));
        w.set_scale(5.0, 6.0);
        assert_eq!(w.scale(), (5.0, 6.0));
        assert_eq!(w.position(), (10.0, 20.0));
    }

    #[test]
    fn test_bounding_box() {
        let w = Worldly::new(50.0, 150.0, 400.0, 400.0, 0.0);
        let bb = w.bounding_box();
        assert!(bb.contains(50.0, 150.0));
        assert!(bb.contains(449.0, 549.0));
        assert!(!bb.contains(451.0, 300.0));
    }

    #[test]
    fn test_inactive_drawable_skips_layer() {
        let mut d = Drawable::new(Sprite::from_image("s", RgbaImage::new(1, 1)), RenderLayer::Ui);
        assert!(d.draws_on(RenderLayer::Ui));
        assert!(!d.draws_on(RenderLayer::Background));
        d.set_active(false);
        assert!(!d.draws_on(RenderLayer::Ui));
    }

    #[test]
    fn test_draw_uses_worldly_placement() {
        let d = Drawable::new(Sprite::from_image("piece", RgbaImage::new(18, 18)), RenderLayer::ForegroundObject);
        let w = Worldly::new(1.0, 2.0, 40.0, 40.0, 0.5);
        let mut canvas = RecordingCanvas::default();
        d.draw(&mut canvas, &w);
        assert_eq!(
            canvas.calls,
            vec![DrawCall::Sprite {
                key: "piece".to_string(),
                params: DrawParams { x: 1.0, y: 2.0, w: 40.0, h: 40.0, angle: 0.5 },
            }]
        );
    }
}
