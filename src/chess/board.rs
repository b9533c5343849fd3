//! Board geometry and square notation
//!
//! Native squares are `(file, rank)` with file 0 = algebraic `a` and
//! rank 0 = the top row as drawn (algebraic rank 8). White starts at the
//! bottom of the screen.
//!
//! Screen placement comes from the board sprite: a 180x180 px image with
//! a 2 px border and 22 px cells, drawn at 400x400 centred on the canvas.
//! A piece sits at `board offset + cell padding + cell size * coordinate`
//! on each axis.

use std::fmt;
use std::str::FromStr;

use crate::game::event::SquareClicked;
use crate::game::{Actor, ActorId, Clickable, Drawable, RenderLayer, Worldly};
use crate::texture::Sprite;
use crate::ui::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const BOARD_WIDTH: f32 = 400.0;
pub const BOARD_HEIGHT: f32 = 400.0;
pub const BOARD_SPRITE_WIDTH: f32 = 180.0;
pub const BOARD_SPRITE_HEIGHT: f32 = 180.0;
pub const BOARD_PIXEL_BORDER: f32 = 2.0;

/// Canvas units per board sprite pixel
pub const BOARD_CONVERSION_FACTOR: f32 = BOARD_WIDTH / BOARD_SPRITE_WIDTH;

/// Top-left of the board sprite on the canvas
pub const BOARD_X: f32 = (SCREEN_WIDTH - BOARD_WIDTH) / 2.0;
pub const BOARD_Y: f32 = (SCREEN_HEIGHT - BOARD_HEIGHT) / 2.0;

/// Top-left of cell (0, 0): the board position plus the scaled border
pub const BOARD_PIECE_OFFSET_X: f32 = BOARD_CONVERSION_FACTOR * BOARD_PIXEL_BORDER + BOARD_X;
pub const BOARD_PIECE_OFFSET_Y: f32 =
    (BOARD_HEIGHT / BOARD_SPRITE_HEIGHT) * BOARD_PIXEL_BORDER + BOARD_Y;

pub const BOARD_SPRITE_CELL_WIDTH: f32 = 22.0;
pub const BOARD_SPRITE_CELL_HEIGHT: f32 = 22.0;
pub const BOARD_CELL_WIDTH: f32 = BOARD_SPRITE_CELL_WIDTH * BOARD_CONVERSION_FACTOR;
pub const BOARD_CELL_HEIGHT: f32 = BOARD_SPRITE_CELL_HEIGHT * BOARD_CONVERSION_FACTOR;

pub const PIECE_SPRITE_WIDTH: f32 = 18.0;
pub const PIECE_SPRITE_HEIGHT: f32 = 18.0;
pub const PIECE_WIDTH: f32 = PIECE_SPRITE_WIDTH * BOARD_CONVERSION_FACTOR;
pub const PIECE_HEIGHT: f32 = PIECE_SPRITE_HEIGHT * BOARD_CONVERSION_FACTOR;

/// Gap between a cell's edge and the piece inside it
pub const BOARD_CELL_PADDING_WIDTH: f32 = (BOARD_CELL_WIDTH - PIECE_WIDTH) / 2.0;
pub const BOARD_CELL_PADDING_HEIGHT: f32 = (BOARD_CELL_HEIGHT - PIECE_HEIGHT) / 2.0;

pub const ACTOR_TYPE_BOARD: &str = "actor-board";
pub const BOARD_ACTOR_ID: &str = "board-actor";

/// A board coordinate. Only `[0, 7]` on both axes is on the board, but
/// move generation builds off-board squares before filtering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSquare {
    pub file: i32,
    pub rank: i32,
}

impl BoardSquare {
    pub const fn new(file: i32, rank: i32) -> Self {
        Self { file, rank }
    }

    pub fn is_on_board(&self) -> bool {
        (0..8).contains(&self.file) && (0..8).contains(&self.rank)
    }

    pub fn offset(&self, file: i32, rank: i32) -> Self {
        Self::new(self.file + file, self.rank + rank)
    }

    /// From 1-indexed algebraic `(file, rank)`; `(1, 1)` is a1, bottom left
    pub fn from_algebraic(file: i32, rank: i32) -> Self {
        Self::new(file - 1, 8 - rank)
    }

    /// To 1-indexed algebraic `(file, rank)`
    pub fn to_algebraic(&self) -> (i32, i32) {
        (self.file + 1, 8 - self.rank)
    }

    /// The cell's area on the canvas
    pub fn cell_rect(&self) -> Rect {
        Rect::new(
            BOARD_PIECE_OFFSET_X + BOARD_CELL_WIDTH * self.file as f32,
            BOARD_PIECE_OFFSET_Y + BOARD_CELL_HEIGHT * self.rank as f32,
            BOARD_CELL_WIDTH,
            BOARD_CELL_HEIGHT,
        )
    }

    /// Top-left corner of a piece standing on this square
    pub fn piece_origin(&self) -> (f32, f32) {
        let cell = self.cell_rect();
        (cell.x + BOARD_CELL_PADDING_WIDTH, cell.y + BOARD_CELL_PADDING_HEIGHT)
    }

    /// The square under a canvas point, if any
    pub fn at_canvas(x: f32, y: f32) -> Option<Self> {
        let fx = (x - BOARD_PIECE_OFFSET_X) / BOARD_CELL_WIDTH;
        let fy = (y - BOARD_PIECE_OFFSET_Y) / BOARD_CELL_HEIGHT;
        if fx < 0.0 || fy < 0.0 {
            return None;
        }
        let square = Self::new(fx as i32, fy as i32);
        square.is_on_board().then_some(square)
    }
}

/// Algebraic text, e.g. `e4`; off-board squares print as raw coordinates
impl fmt::Display for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({}, {})", self.file, self.rank);
        }
        let (file, rank) = self.to_algebraic();
        write!(f, "{}{}", (b'a' + (file - 1) as u8) as char, rank)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid square notation {0:?}")]
pub struct ParseSquareError(String);

impl FromStr for BoardSquare {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };
        let file = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => (c as u8 - b'a') as i32 + 1,
            _ => return Err(err()),
        };
        let rank = match rank {
            c @ '1'..='8' => (c as u8 - b'0') as i32,
            _ => return Err(err()),
        };
        Ok(Self::from_algebraic(file, rank))
    }
}

/// The board: sprite on the foreground layer, clickable, and publishing
/// a `SquareClicked` for presses that land on a cell.
pub fn board_actor(sprite: Sprite) -> Actor {
    let clickable = Clickable::new().on_press(|ctx| {
        if let Some(square) = BoardSquare::at_canvas(ctx.x, ctx.y) {
            log::debug!("{} clicked at {}", ctx.actor, square);
            ctx.events.square_clicked.send(SquareClicked { square });
        }
        Ok(())
    });

    Actor::new(ACTOR_TYPE_BOARD, ActorId::from(BOARD_ACTOR_ID))
        .with(Drawable::new(sprite, RenderLayer::Foreground))
        .with(Worldly::new(BOARD_X, BOARD_Y, BOARD_WIDTH, BOARD_HEIGHT, 0.0))
        .with(clickable)
}
