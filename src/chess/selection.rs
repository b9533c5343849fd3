//! Click-to-move interaction for the main scene
//!
//! Consumes the board's `SquareClicked` events. The first click on a piece
//! selects it; the next click either moves it to one of its candidate
//! squares, switches the selection to another piece, or drops the
//! selection.

use macroquad::color::Color;

use super::board::BoardSquare;
use super::piece::ACTOR_TYPE_CHESS_PIECE;
use crate::error::GameError;
use crate::game::{ActorId, Canvas, Events, RenderLayer};
use crate::scene::{ActorList, SceneSystem};

const HINT_COLOR: Color = Color::new(0.95, 0.85, 0.25, 0.35);
const SELECTED_COLOR: Color = Color::new(0.95, 0.85, 0.25, 0.9);
const SELECTED_THICKNESS: f32 = 3.0;
const HINT_INSET: f32 = 6.0;

/// First piece standing on `square`, in actor order
pub fn piece_at(actors: &ActorList, square: BoardSquare) -> Option<ActorId> {
    actors
        .of_type(ACTOR_TYPE_CHESS_PIECE)
        .find(|actor| matches!(actor.chess_piece(), Ok(p) if p.position() == square))
        .map(|actor| actor.id().clone())
}

#[derive(Debug, Default)]
pub struct MoveSelection {
    selected: Option<ActorId>,
    show_hints: bool,
}

impl MoveSelection {
    pub fn new(show_hints: bool) -> Self {
        Self {
            selected: None,
            show_hints,
        }
    }

    pub fn selected(&self) -> Option<&ActorId> {
        self.selected.as_ref()
    }

    fn click(&mut self, actors: &mut ActorList, square: BoardSquare) -> Result<(), GameError> {
        let Some(id) = self.selected.take() else {
            self.selected = piece_at(actors, square);
            if let Some(id) = &self.selected {
                log::debug!("selected {} on {}", id, square);
            }
            return Ok(());
        };

        let actor = actors.get_mut(&id)?;
        let piece = actor.chess_piece_mut()?;
        let from = piece.position();
        if square == from {
            log::debug!("deselected {}", id);
            return Ok(());
        }

        if piece.set_position(square) {
            log::info!("{} {} {} -> {}", piece.side(), piece.kind(), from, square);
            let (x, y) = piece.screen_origin();
            actor.worldly_mut()?.set_position(x, y);
            return Ok(());
        }

        log::debug!("{} cannot move {} -> {}", id, from, square);
        self.selected = piece_at(actors, square);
        Ok(())
    }
}

impl SceneSystem for MoveSelection {
    fn run(&mut self, actors: &mut ActorList, events: &mut Events) -> Result<(), GameError> {
        for click in events.square_clicked.drain() {
            self.click(actors, click.square)?;
        }
        Ok(())
    }

    fn draw(
        &self,
        actors: &ActorList,
        canvas: &mut dyn Canvas,
        layer: RenderLayer,
    ) -> Result<(), GameError> {
        let (RenderLayer::Ui, Some(id)) = (layer, &self.selected) else {
            return Ok(());
        };
        let piece = actors.get(id)?.chess_piece()?;
        if self.show_hints {
            for square in piece.available_moves() {
                if square != piece.position() {
                    canvas.fill_rect(square.cell_rect().pad(HINT_INSET), HINT_COLOR);
                }
            }
        }
        canvas.outline_rect(piece.position().cell_rect(), SELECTED_THICKNESS, SELECTED_COLOR);
        Ok(())
    }
}
