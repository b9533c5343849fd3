//! Pointer interaction component
//!
//! Hit-tests the pointer against the sibling worldly's bounding box once
//! per frame and runs a four-state machine:
//!
//! ```text
//!   None --press while hovering--> Pressed --next frame--> Held
//!    ^                                |                     |
//!    |                             release          release, or hover lost
//!    |                                v                     |
//!    +-----------next frame------- Released <---------------+
//! ```
//!
//! A button-up moves any state to Released, wherever the press started.
//! Entering Pressed fires press listeners and publishes a `pointer_pressed`
//! event, entering Released does the same for release, and hover listeners
//! fire on every frame the pointer is over the box. A failing listener
//! aborts the update.

use std::fmt;

use super::actor::{ActorId, UpdateContext};
use super::event::{Events, PointerEvent};
use crate::error::GameError;
use crate::ui::Rect;

/// Pointer button state of one clickable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    None,
    Pressed,
    Released,
    Held,
}

/// What a listener sees when it fires
pub struct ListenerContext<'a> {
    /// Actor owning the clickable
    pub actor: &'a ActorId,
    /// Pointer position in logical canvas units
    pub x: f32,
    pub y: f32,
    /// The scene's event queues
    pub events: &'a mut Events,
}

impl ListenerContext<'_> {
    fn event(&self) -> PointerEvent {
        PointerEvent {
            actor: self.actor.clone(),
            x: self.x,
            y: self.y,
        }
    }
}

/// Callback run on a pointer transition
pub type ClickListener = Box<dyn FnMut(&mut ListenerContext<'_>) -> Result<(), GameError>>;

/// Pointer hit-testing with press/release/hover listeners
#[derive(Default)]
pub struct Clickable {
    state: PointerState,
    hover: bool,
    press_listeners: Vec<ClickListener>,
    release_listeners: Vec<ClickListener>,
    hover_listeners: Vec<ClickListener>,
}

impl Clickable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for entering `state`.
    /// Only Pressed and Released fire; other states are ignored.
    pub fn add_state_listener(&mut self, state: PointerState, listener: ClickListener) {
        match state {
            PointerState::Pressed => self.press_listeners.push(listener),
            PointerState::Released => self.release_listeners.push(listener),
            PointerState::None | PointerState::Held => {
                log::warn!("ignoring listener for {:?}: state never fires", state);
            }
        }
    }

    /// Builder form of `add_state_listener(Pressed, ..)`
    pub fn on_press(
        mut self,
        listener: impl FnMut(&mut ListenerContext<'_>) -> Result<(), GameError> + 'static,
    ) -> Self {
        self.press_listeners.push(Box::new(listener));
        self
    }

    /// Builder form of `add_state_listener(Released, ..)`
    pub fn on_release(
        mut self,
        listener: impl FnMut(&mut ListenerContext<'_>) -> Result<(), GameError> + 'static,
    ) -> Self {
        self.release_listeners.push(Box::new(listener));
        self
    }

    pub fn add_hover_listener(&mut self, listener: ClickListener) {
        self.hover_listeners.push(listener);
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    /// Advance one frame. `bounds` is the sibling worldly's bounding box.
    pub fn update(
        &mut self,
        actor: &ActorId,
        bounds: Rect,
        ctx: &mut UpdateContext<'_>,
    ) -> Result<(), GameError> {
        let pointer = ctx.input.pointer;
        self.hover = pointer.inside(&bounds);

        let mut listener_ctx = ListenerContext {
            actor,
            x: pointer.x,
            y: pointer.y,
            events: &mut *ctx.events,
        };

        if pointer.left_pressed && self.hover {
            self.state = PointerState::Pressed;
            let event = listener_ctx.event();
            listener_ctx.events.pointer_pressed.send(event);
            fire(&mut self.press_listeners, &mut listener_ctx)?;
        } else if pointer.left_released || (self.state == PointerState::Held && !self.hover) {
            self.state = PointerState::Released;
            let event = listener_ctx.event();
            listener_ctx.events.pointer_released.send(event);
            fire(&mut self.release_listeners, &mut listener_ctx)?;
        } else if self.state == PointerState::Pressed {
            self.state = PointerState::Held;
        } else if self.state == PointerState::Released {
            self.state = PointerState::None;
        }

        if self.hover {
            fire(&mut self.hover_listeners, &mut listener_ctx)?;
        }
        Ok(())
    }
}

fn fire(listeners: &mut [ClickListener], ctx: &mut ListenerContext<'_>) -> Result<(), GameError> {
    for listener in listeners.iter_mut() {
        listener(ctx)?;
    }
    Ok(())
}

impl fmt::Debug for Clickable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clickable")
            .field("state", &self.state)
            .field("hover", &self.hover)
            .field("press_listeners", &self.press_listeners.len())
            .field("release_listeners", &self.release_listeners.len())
            .field("hover_listeners", &self.hover_listeners.len())
            .finish()
    }
}
