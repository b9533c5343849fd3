//! Per-frame input snapshot
//!
//! The frame loop polls macroquad once per frame and hands the snapshot
//! down through the scene. Nothing below the loop touches macroquad input
//! directly, so components can be driven from tests.

use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position, KeyCode,
    MouseButton,
};

use super::{Rect, Viewport};

/// Pointer state in logical canvas coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerInput {
    pub x: f32,
    pub y: f32,
    pub left_pressed: bool,  // Just pressed this frame
    pub left_released: bool, // Just released this frame
}

impl PointerInput {
    /// Pointer resting at a position with no button activity
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Check if pointer is inside a rect
    pub fn inside(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }
}

/// Everything the game reads from the host in one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub pointer: PointerInput,
    /// Quit key went down this frame
    pub quit_pressed: bool,
}

impl FrameInput {
    /// Read the current frame's input from macroquad
    pub fn poll(viewport: &Viewport) -> Self {
        let (mx, my) = mouse_position();
        let (x, y) = viewport.to_logical(mx, my);
        Self {
            pointer: PointerInput {
                x,
                y,
                left_pressed: is_mouse_button_pressed(MouseButton::Left),
                left_released: is_mouse_button_released(MouseButton::Left),
            },
            quit_pressed: is_key_pressed(KeyCode::Escape),
        }
    }
}
