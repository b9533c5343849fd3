//! Game error type
//!
//! Every fallible operation in the framework returns `GameError`. Errors
//! are never recovered from: the first one aborts the current update or
//! draw pass and travels up to the frame loop, which treats it as fatal.

use std::path::PathBuf;

use crate::game::Capability;

/// Error type for the actor/scene framework and asset loading
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Capability lookup on an actor found nothing registered
    #[error("component of type {capability} on {actor} not found")]
    ComponentNotFound {
        capability: Capability,
        actor: String,
    },

    /// Actor id lookup in a scene found nothing
    #[error("actor {actor} not found in scene {scene}")]
    ActorNotFound { actor: String, scene: String },

    /// Transition requested to an id with no generator
    #[error("scene {0} is not registered")]
    SceneNotRegistered(String),

    /// Update or draw reached the scene machine before any scene ran
    #[error("no active scene")]
    NoActiveScene,

    /// Sprite file could not be opened or decoded
    #[error("failed to load sprite {}: {source}", path.display())]
    Sprite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Asset file could not be fetched
    #[error("failed to read asset {}: {message}", path.display())]
    Asset { path: PathBuf, message: String },

    /// A pointer listener reported a failure
    #[error("listener on {actor} failed: {message}")]
    Listener { actor: String, message: String },

    /// Config file I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
