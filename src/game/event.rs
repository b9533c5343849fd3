//! Event System
//!
//! Events let components talk to scene systems without holding references
//! to each other. Pointer listeners publish during the actor update pass;
//! scene systems read the queues right after, then the scene clears them.
//!
//! Example flow:
//! 1. Board's clickable sees a press → its listener sends a SquareClicked
//! 2. Move selection system reads SquareClicked → selects or moves a piece

use super::actor::ActorId;
use crate::chess::BoardSquare;

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All event queues of one scene
#[derive(Debug, Default)]
pub struct Events {
    /// A clickable went to the pressed state
    pub pointer_pressed: EventQueue<PointerEvent>,

    /// A clickable went to the released state
    pub pointer_released: EventQueue<PointerEvent>,

    /// A board square was clicked
    pub square_clicked: EventQueue<SquareClicked>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Called at the end of each scene update.
    pub fn clear_all(&mut self) {
        self.pointer_pressed.clear();
        self.pointer_released.clear();
        self.square_clicked.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Pointer interaction on an actor
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Actor owning the clickable
    pub actor: ActorId,
    /// Pointer position in logical canvas units
    pub x: f32,
    pub y: f32,
}

/// A square on the board was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareClicked {
    pub square: BoardSquare,
}
