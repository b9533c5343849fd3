//! Screen-space helpers shared by the frame loop and the components
//!
//! - Rect: hit-testing and overlay geometry
//! - Viewport: fixed logical canvas scaled into the window
//! - Input: per-frame pointer/key snapshot

#![allow(dead_code)]

mod rect;
mod input;
mod viewport;

pub use rect::*;
pub use input::*;
pub use viewport::*;
