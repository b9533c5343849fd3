//! Chess on top of the actor framework
//!
//! - board: square coordinates, notation and screen geometry
//! - piece: sides, piece types and the move rule table
//! - selection: click-to-move scene system
//! - main_scene: scene builders for the start and stop scenes

pub mod board;
pub mod main_scene;
pub mod piece;
pub mod selection;

pub use board::{board_actor, BoardSquare, ParseSquareError};
pub use main_scene::{build_main_scene, build_stop_scene, required_sprites};
pub use piece::{candidate_moves, piece_actor, ChessPiece, PieceKind, Side};
pub use selection::MoveSelection;
