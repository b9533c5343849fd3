//! Actors - identified bags of components
//!
//! An actor forwards the per-frame update to each of its components in
//! attachment order and the per-layer draw to its active drawables.
//! Components that need a sibling (pieces snap their worldly to the grid,
//! clickables hit-test against it) get it through the actor's
//! registration index.

use std::fmt;

use super::clickable::Clickable;
use super::component::{Capability, Component, Components};
use super::components::Worldly;
use super::event::Events;
use super::renderer::{Canvas, RenderLayer};
use crate::chess::ChessPiece;
use crate::error::GameError;
use crate::ui::FrameInput;

/// Unique actor identifier within a scene
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActorId(String);

impl ActorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        ActorId(id.to_string())
    }
}

impl From<String> for ActorId {
    fn from(id: String) -> Self {
        ActorId(id)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out `basename + counter` ids.
///
/// One counter is shared by all basenames, so ids never collide even when
/// one basename is a prefix of another. Owned by the scene being built.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id for `basename`
    pub fn allocate(&mut self, basename: &str) -> ActorId {
        let id = ActorId(format!("{}{}", basename, self.next));
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

/// Per-frame data passed down the update pass
pub struct UpdateContext<'a> {
    pub input: &'a FrameInput,
    pub events: &'a mut Events,
}

/// A game object: type, id and components
pub struct Actor {
    actor_type: String,
    id: ActorId,
    components: Components,
}

impl Actor {
    pub fn new(actor_type: impl Into<String>, id: ActorId) -> Self {
        Self {
            actor_type: actor_type.into(),
            id,
            components: Components::new(),
        }
    }

    /// Attach a component (builder form)
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.attach(component);
        self
    }

    /// Attach a component. The first one of each capability is the one
    /// lookups return.
    pub fn attach(&mut self, component: impl Into<Component>) {
        let component = component.into();
        let capability = component.capability();
        if !self.components.attach(component) && capability != Capability::Drawable {
            log::warn!("{} already has a {}; extra one is never looked up", self.id, capability);
        }
    }

    pub fn actor_type(&self) -> &str {
        &self.actor_type
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Registered component for a capability
    pub fn component(&self, capability: Capability) -> Result<&Component, GameError> {
        self.components
            .get_registered(capability)
            .ok_or_else(|| self.not_found(capability))
    }

    pub fn worldly(&self) -> Result<&Worldly, GameError> {
        match self.component(Capability::Worldly)? {
            Component::Worldly(w) => Ok(w),
            _ => Err(self.not_found(Capability::Worldly)),
        }
    }

    pub fn worldly_mut(&mut self) -> Result<&mut Worldly, GameError> {
        match self.components.get_registered_mut(Capability::Worldly) {
            Some(Component::Worldly(w)) => Ok(w),
            _ => Err(GameError::ComponentNotFound {
                capability: Capability::Worldly,
                actor: self.id.to_string(),
            }),
        }
    }

    pub fn chess_piece(&self) -> Result<&ChessPiece, GameError> {
        match self.component(Capability::ChessPiece)? {
            Component::ChessPiece(p) => Ok(p),
            _ => Err(self.not_found(Capability::ChessPiece)),
        }
    }

    pub fn chess_piece_mut(&mut self) -> Result<&mut ChessPiece, GameError> {
        match self.components.get_registered_mut(Capability::ChessPiece) {
            Some(Component::ChessPiece(p)) => Ok(p),
            _ => Err(GameError::ComponentNotFound {
                capability: Capability::ChessPiece,
                actor: self.id.to_string(),
            }),
        }
    }

    pub fn clickable(&self) -> Result<&Clickable, GameError> {
        match self.component(Capability::Clickable)? {
            Component::Clickable(c) => Ok(c),
            _ => Err(self.not_found(Capability::Clickable)),
        }
    }

    fn not_found(&self, capability: Capability) -> GameError {
        GameError::ComponentNotFound {
            capability,
            actor: self.id.to_string(),
        }
    }

    /// Update every component in attachment order; first error aborts
    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), GameError> {
        for idx in 0..self.components.len() {
            let capability = match self.components.get(idx) {
                Some(component) => component.capability(),
                None => break,
            };
            match capability {
                Capability::ChessPiece => self.lock_piece_to_grid(idx)?,
                Capability::Clickable => self.update_clickable(idx, ctx)?,
                Capability::Worldly | Capability::Drawable => {}
            }
        }
        Ok(())
    }

    /// Snap the worldly to the piece's board square
    fn lock_piece_to_grid(&mut self, idx: usize) -> Result<(), GameError> {
        let (x, y) = match self.components.get(idx) {
            Some(Component::ChessPiece(piece)) => piece.screen_origin(),
            _ => return Ok(()),
        };
        self.worldly_mut()?.set_position(x, y);
        Ok(())
    }

    fn update_clickable(&mut self, idx: usize, ctx: &mut UpdateContext<'_>) -> Result<(), GameError> {
        let bounds = self.worldly()?.bounding_box();
        match self.components.get_mut(idx) {
            Some(Component::Clickable(clickable)) => clickable.update(&self.id, bounds, ctx),
            _ => Ok(()),
        }
    }

    /// Draw every active drawable on `layer`, in attachment order
    pub fn draw(&self, canvas: &mut dyn Canvas, layer: RenderLayer) -> Result<(), GameError> {
        for component in self.components.iter() {
            if let Component::Drawable(drawable) = component {
                if drawable.draws_on(layer) {
                    drawable.draw(canvas, self.worldly()?);
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("actor_type", &self.actor_type)
            .field("id", &self.id)
            .field("components", &self.components.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{BoardSquare, PieceKind, Side};
    use crate::game::clickable::PointerState;
    use crate::game::components::Drawable;
    use crate::game::renderer::testing::RecordingCanvas;
    use crate::texture::Sprite;
    use crate::ui::PointerInput;
    use image::RgbaImage;

    fn sprite(key: &str) -> Sprite {
        Sprite::from_image(key, RgbaImage::new(1, 1))
    }

    fn run_update(actor: &mut Actor, input: FrameInput) -> Result<Events, GameError> {
        let mut events = Events::new();
        let mut ctx = UpdateContext { input: &input, events: &mut events };
        actor.update(&mut ctx)?;
        Ok(events)
    }

    #[test]
    fn test_id_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("piece-white-pawn").as_str(), "piece-white-pawn0");
        assert_eq!(ids.allocate("piece-black-pawn").as_str(), "piece-black-pawn1");
        assert_eq!(ids.allocate("piece-white-pawn").as_str(), "piece-white-pawn2");
        assert_eq!(ids.allocated(), 3);
    }

    #[test]
    fn test_missing_component_error() {
        let actor = Actor::new("actor-test", ActorId::from("lonely"));
        let err = actor.worldly().unwrap_err();
        assert_eq!(err.to_string(), "component of type component-worldly on lonely not found");
        assert!(actor.chess_piece().is_err());
    }

    #[test]
    fn test_draw_filters_by_layer_and_active() {
        let mut hidden = Drawable::new(sprite("hidden"), RenderLayer::Ui);
        hidden.set_active(false);
        let actor = Actor::new("actor-test", ActorId::from("a"))
            .with(Drawable::new(sprite("back"), RenderLayer::Background))
            .with(Drawable::new(sprite("ui"), RenderLayer::Ui))
            .with(hidden)
            .with(Worldly::new(0.0, 0.0, 10.0, 10.0, 0.0));

        let mut canvas = RecordingCanvas::default();
        actor.draw(&mut canvas, RenderLayer::Ui).unwrap();
        assert_eq!(canvas.sprite_keys(), vec!["ui"]);

        let mut canvas = RecordingCanvas::default();
        actor.draw(&mut canvas, RenderLayer::Foreground).unwrap();
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn test_draw_without_worldly_fails() {
        let actor = Actor::new("actor-test", ActorId::from("floating"))
            .with(Drawable::new(sprite("s"), RenderLayer::Background));
        let mut canvas = RecordingCanvas::default();
        assert!(actor.draw(&mut canvas, RenderLayer::Background).is_err());
        // Nothing to draw on other layers, so no lookup happens
        assert!(actor.draw(&mut canvas, RenderLayer::Ui).is_ok());
    }

    #[test]
    fn test_update_locks_piece_to_grid() {
        let piece = ChessPiece::new(Side::White, PieceKind::Knight, BoardSquare::new(1, 7));
        let expected = piece.screen_origin();
        let mut actor = Actor::new("actor-chess-piece", ActorId::from("knight"))
            .with(Worldly::new(0.0, 0.0, 40.0, 40.0, 0.0))
            .with(piece);

        run_update(&mut actor, FrameInput::default()).unwrap();
        assert_eq!(actor.worldly().unwrap().position(), expected);
    }

    #[test]
    fn test_update_piece_without_worldly_fails() {
        let mut actor = Actor::new("actor-chess-piece", ActorId::from("knight"))
            .with(ChessPiece::new(Side::White, PieceKind::Knight, BoardSquare::new(1, 7)));
        let err = run_update(&mut actor, FrameInput::default()).unwrap_err();
        assert!(matches!(err, GameError::ComponentNotFound { capability: Capability::Worldly, .. }));
    }

    #[test]
    fn test_update_drives_clickable_against_worldly_box() {
        let mut actor = Actor::new("actor-button", ActorId::from("button"))
            .with(Worldly::new(100.0, 100.0, 50.0, 50.0, 0.0))
            .with(Clickable::new());

        let outside = FrameInput {
            pointer: PointerInput { left_pressed: true, ..PointerInput::at(10.0, 10.0) },
            quit_pressed: false,
        };
        let events = run_update(&mut actor, outside).unwrap();
        assert!(events.pointer_pressed.is_empty());

        let inside = FrameInput {
            pointer: PointerInput { left_pressed: true, ..PointerInput::at(120.0, 120.0) },
            quit_pressed: false,
        };
        let events = run_update(&mut actor, inside).unwrap();
        let pressed: Vec<_> = events.pointer_pressed.iter().collect();
        assert_eq!(pressed.len(), 1);
        assert_eq!(pressed[0].actor.as_str(), "button");
        assert_eq!(actor.clickable().unwrap().state(), PointerState::Pressed);
    }

    #[test]
    fn test_first_worldly_wins_lookup() {
        let actor = Actor::new("actor-test", ActorId::from("twice"))
            .with(Worldly::new(1.0, 1.0, 1.0, 1.0, 0.0))
            .with(Worldly::new(2.0, 2.0, 2.0, 2.0, 0.0));
        assert_eq!(actor.worldly().unwrap().position(), (1.0, 1.0));
    }
}
