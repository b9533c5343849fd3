//! Logical canvas layout
//!
//! The game draws into a fixed 500x700 logical canvas. The window can be
//! any size: the canvas is scaled uniformly to fit and centered, leaving
//! letterbox bars on the long axis.

/// Logical canvas width
pub const SCREEN_WIDTH: f32 = 500.0;
/// Logical canvas height
pub const SCREEN_HEIGHT: f32 = 700.0;

/// Logical canvas size for a given window size.
///
/// Always the fixed canvas; the window size only affects scaling.
pub fn layout(_outside_width: f32, _outside_height: f32) -> (f32, f32) {
    (SCREEN_WIDTH, SCREEN_HEIGHT)
}

/// Mapping between logical canvas coordinates and window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Viewport {
    /// One logical unit per pixel, no offset
    pub const IDENTITY: Viewport = Viewport {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Fit the logical canvas into a window of the given size
    pub fn fit(window_width: f32, window_height: f32) -> Self {
        let (width, height) = layout(window_width, window_height);
        let scale = (window_width / width).min(window_height / height);
        // Minimized windows report zero size
        if !scale.is_finite() || scale <= 0.0 {
            return Self::IDENTITY;
        }
        Self {
            scale,
            offset_x: (window_width - width * scale) * 0.5,
            offset_y: (window_height - height * scale) * 0.5,
        }
    }

    /// Logical canvas point to window pixels
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (self.offset_x + x * self.scale, self.offset_y + y * self.scale)
    }

    /// Window pixels to logical canvas point
    pub fn to_logical(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}
