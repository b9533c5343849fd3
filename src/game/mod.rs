//! Game Foundation Module
//!
//! A minimal actor/component framework for a single-screen 2D game.
//!
//! Key concepts:
//! - Actor: an identified, typed bag of components
//! - Component: closed set of behaviours (placement, sprite, pointer, chess piece)
//! - Event: decoupled communication from components to scene systems
//! - Renderer: render layers and the drawing surface trait
//!
//! Design philosophy:
//! - Simple over flexible (we know what game we're making)
//! - Compile-time known components, looked up through an index built on attach
//! - Everything single-threaded, driven once per frame by the host loop

#![allow(dead_code)]

pub mod actor;
pub mod component;
pub mod components;
pub mod clickable;
pub mod event;
pub mod renderer;

// Re-export main types
pub use actor::{Actor, ActorId, IdAllocator, UpdateContext};
pub use clickable::{ClickListener, Clickable, ListenerContext, PointerState};
pub use component::{Capability, Component};
pub use components::{Drawable, Worldly};
pub use event::{Events, SquareClicked};
pub use renderer::{Canvas, RenderLayer, ScreenCanvas};
