//! Component Storage
//!
//! Components are a closed set: every capability an actor can carry is a
//! variant of `Component`. An actor keeps its components in attachment
//! order (that is the update/draw order) plus a small registration index
//! mapping each capability to the first component attached with it.
//!
//! The index is filled in at attach time, so capability lookups are a
//! single array read rather than a scan. Later components of an already
//! registered capability still update and draw, they just never win a
//! lookup.

use std::fmt;

use super::clickable::Clickable;
use super::components::{Drawable, Worldly};
use crate::chess::ChessPiece;

/// What a component can do; the lookup key for sibling access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Worldly = 0,
    Drawable = 1,
    Clickable = 2,
    ChessPiece = 3,
}

impl Capability {
    pub const COUNT: usize = 4;

    pub const ALL: [Capability; Capability::COUNT] = [
        Capability::Worldly,
        Capability::Drawable,
        Capability::Clickable,
        Capability::ChessPiece,
    ];

    /// Stable name used in logs and error messages
    pub fn tag(&self) -> &'static str {
        match self {
            Capability::Worldly => "component-worldly",
            Capability::Drawable => "component-drawable",
            Capability::Clickable => "component-clickable",
            Capability::ChessPiece => "component-chess-piece",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A behaviour unit attached to an actor
pub enum Component {
    Worldly(Worldly),
    Drawable(Drawable),
    Clickable(Clickable),
    ChessPiece(ChessPiece),
}

impl Component {
    pub fn capability(&self) -> Capability {
        match self {
            Component::Worldly(_) => Capability::Worldly,
            Component::Drawable(_) => Capability::Drawable,
            Component::Clickable(_) => Capability::Clickable,
            Component::ChessPiece(_) => Capability::ChessPiece,
        }
    }
}

impl From<Worldly> for Component {
    fn from(c: Worldly) -> Self {
        Component::Worldly(c)
    }
}

impl From<Drawable> for Component {
    fn from(c: Drawable) -> Self {
        Component::Drawable(c)
    }
}

impl From<Clickable> for Component {
    fn from(c: Clickable) -> Self {
        Component::Clickable(c)
    }
}

impl From<ChessPiece> for Component {
    fn from(c: ChessPiece) -> Self {
        Component::ChessPiece(c)
    }
}

/// Ordered components of one actor with a per-capability index
pub struct Components {
    list: Vec<Component>,
    registered: [Option<usize>; Capability::COUNT],
}

impl Components {
    pub fn new() -> Self {
        Self {
            list: Vec::new(),
            registered: [None; Capability::COUNT],
        }
    }

    /// Append a component.
    /// Returns true if it became the registered one for its capability.
    pub fn attach(&mut self, component: Component) -> bool {
        let slot = component.capability().slot();
        let idx = self.list.len();
        self.list.push(component);
        if self.registered[slot].is_none() {
            self.registered[slot] = Some(idx);
            true
        } else {
            false
        }
    }

    /// Index of the registered component for a capability
    pub fn registered(&self, capability: Capability) -> Option<usize> {
        self.registered[capability.slot()]
    }

    pub fn get_registered(&self, capability: Capability) -> Option<&Component> {
        self.registered(capability).map(|idx| &self.list[idx])
    }

    pub fn get_registered_mut(&mut self, capability: Capability) -> Option<&mut Component> {
        match self.registered(capability) {
            Some(idx) => Some(&mut self.list[idx]),
            None => None,
        }
    }

    pub fn get(&self, idx: usize) -> Option<&Component> {
        self.list.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Component> {
        self.list.get_mut(idx)
    }

    /// Iterate in attachment order
    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Number of attached components with a capability
    pub fn count(&self, capability: Capability) -> usize {
        self.list.iter().filter(|c| c.capability() == capability).count()
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::new()
    }
}
