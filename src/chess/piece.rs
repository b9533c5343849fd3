//! Chess pieces and their move rules
//!
//! Move generation is a fixed geometric table per piece type. It knows
//! nothing about other pieces: sliding pieces sweep the whole line, pawns
//! get their diagonals whether or not anything stands there, and there is
//! no check, capture or turn order.

use std::fmt;

use super::board::{BoardSquare, PIECE_HEIGHT, PIECE_WIDTH};
use crate::error::GameError;
use crate::game::{Actor, Drawable, IdAllocator, RenderLayer, Worldly};
use crate::texture::SpriteLibrary;

pub const ACTOR_TYPE_CHESS_PIECE: &str = "actor-chess-piece";

/// Counter-clockwise from far right
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Counter-clockwise from far right
const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }

    /// Native rank step toward the opponent's home row
    pub fn forward(&self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    #[cfg(test)]
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every on-board square the rule table allows from `from`.
///
/// Duplicates from overlapping sweeps are dropped; order follows
/// generation order. Sliding sweeps include `from` itself.
pub fn candidate_moves(side: Side, kind: PieceKind, from: BoardSquare) -> Vec<BoardSquare> {
    let mut raw = Vec::with_capacity(32);
    match kind {
        PieceKind::Pawn => {
            let d = side.forward();
            raw.extend([
                from.offset(0, d),
                from.offset(0, 2 * d),
                from.offset(-1, d),
                from.offset(1, d),
            ]);
        }
        PieceKind::Rook => {
            for i in 0..8 {
                push_lines(&mut raw, from, i);
            }
        }
        PieceKind::Bishop => {
            for i in 0..8 {
                push_diagonals(&mut raw, from, i);
            }
        }
        PieceKind::Queen => {
            for i in 0..8 {
                push_lines(&mut raw, from, i);
                push_diagonals(&mut raw, from, i);
            }
        }
        PieceKind::Knight => {
            raw.extend(KNIGHT_OFFSETS.iter().map(|&(f, r)| from.offset(f, r)));
        }
        PieceKind::King => {
            raw.extend(KING_OFFSETS.iter().map(|&(f, r)| from.offset(f, r)));
        }
    }

    let mut moves: Vec<BoardSquare> = Vec::with_capacity(raw.len());
    for square in raw {
        if square.is_on_board() && !moves.contains(&square) {
            moves.push(square);
        }
    }
    moves
}

/// Square `i` along the rank and along the file
fn push_lines(out: &mut Vec<BoardSquare>, from: BoardSquare, i: i32) {
    out.push(BoardSquare::new(i, from.rank));
    out.push(BoardSquare::new(from.file, i));
}

/// Square `i` steps out along each of the four diagonals
fn push_diagonals(out: &mut Vec<BoardSquare>, from: BoardSquare, i: i32) {
    out.push(from.offset(i, i));
    out.push(from.offset(-i, i));
    out.push(from.offset(-i, -i));
    out.push(from.offset(i, -i));
}

/// Side, type and board position of a piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessPiece {
    side: Side,
    kind: PieceKind,
    position: BoardSquare,
}

impl ChessPiece {
    pub fn new(side: Side, kind: PieceKind, position: BoardSquare) -> Self {
        Self { side, kind, position }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> BoardSquare {
        self.position
    }

    pub fn available_moves(&self) -> Vec<BoardSquare> {
        candidate_moves(self.side, self.kind, self.position)
    }

    /// Move to `square` if the rule table allows it.
    /// Returns false and leaves the piece in place otherwise.
    pub fn set_position(&mut self, square: BoardSquare) -> bool {
        if !self.available_moves().contains(&square) {
            return false;
        }
        // Whatever stood on `square` stays there; captures are not modelled
        self.position = square;
        true
    }

    /// Canvas position the piece's worldly is locked to
    pub fn screen_origin(&self) -> (f32, f32) {
        self.position.piece_origin()
    }

    /// Sprite file for this side and type, e.g. `white_pawn.png`
    pub fn sprite_file(&self) -> String {
        format!("{}_{}.png", self.side.name(), self.kind.name())
    }
}

/// A piece actor: sprite on the foreground-object layer, a worldly sized
/// to the piece, and the chess component that keeps it on its square.
pub fn piece_actor(
    ids: &mut IdAllocator,
    sprites: &mut SpriteLibrary,
    side: Side,
    kind: PieceKind,
    position: BoardSquare,
) -> Result<Actor, GameError> {
    let piece = ChessPiece::new(side, kind, position);
    let sprite = sprites.load(piece.sprite_file())?;
    let id = ids.allocate(&format!("piece-{}-{}", side.name(), kind.name()));
    let (x, y) = piece.screen_origin();

    Ok(Actor::new(ACTOR_TYPE_CHESS_PIECE, id)
        .with(Drawable::new(sprite, RenderLayer::ForegroundObject))
        .with(Worldly::new(x, y, PIECE_WIDTH, PIECE_HEIGHT, 0.0))
        .with(piece))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn sq(file: i32, rank: i32) -> BoardSquare {
        BoardSquare::new(file, rank)
    }

    fn moves(kind: PieceKind, from: BoardSquare) -> Vec<BoardSquare> {
        candidate_moves(Side::White, kind, from)
    }

    fn all_squares() -> impl Iterator<Item = BoardSquare> {
        (0..8).flat_map(|f| (0..8).map(move |r| sq(f, r)))
    }

    #[test]
    fn test_knight_in_centre_has_eight_moves() {
        let m = moves(PieceKind::Knight, sq(4, 4));
        assert_eq!(m.len(), 8);
        assert!(m.iter().all(|s| s.is_on_board()));
        assert!(m.contains(&sq(6, 5)));
        assert!(m.contains(&sq(3, 2)));
    }

    #[test]
    fn test_king_in_corner_has_three_moves() {
        let m = moves(PieceKind::King, sq(0, 0));
        assert_eq!(m.len(), 3);
        for expected in [sq(1, 0), sq(1, 1), sq(0, 1)] {
            assert!(m.contains(&expected));
        }
    }

    #[test]
    fn test_rook_covers_rank_and_file_from_everywhere() {
        for from in all_squares() {
            let m = moves(PieceKind::Rook, from);
            assert!(m.iter().all(|s| s.is_on_board()));
            for i in 0..8 {
                assert!(m.contains(&sq(i, from.rank)));
                assert!(m.contains(&sq(from.file, i)));
            }
            // 7 + 7 + the origin itself
            assert_eq!(m.len(), 15);
        }
    }

    #[test]
    fn test_bishop_covers_diagonals_from_everywhere() {
        for from in all_squares() {
            let m = moves(PieceKind::Bishop, from);
            assert!(m.iter().all(|s| s.is_on_board()));
            for to in all_squares() {
                let on_diagonal = (to.file - from.file).abs() == (to.rank - from.rank).abs();
                assert_eq!(m.contains(&to), on_diagonal, "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        for from in all_squares() {
            let queen = moves(PieceKind::Queen, from);
            let rook = moves(PieceKind::Rook, from);
            let bishop = moves(PieceKind::Bishop, from);
            for to in all_squares() {
                assert_eq!(
                    queen.contains(&to),
                    rook.contains(&to) || bishop.contains(&to)
                );
            }
        }
    }

    #[test]
    fn test_moves_have_no_duplicates() {
        for kind in PieceKind::ALL {
            for from in all_squares() {
                let m = moves(kind, from);
                for (i, a) in m.iter().enumerate() {
                    assert!(!m[i + 1..].contains(a), "{} from {} repeats {}", kind, from, a);
                }
            }
        }
    }

    #[test]
    fn test_pawn_moves_toward_opponent() {
        // White pawn on e2
        let e2 = BoardSquare::from_algebraic(5, 2);
        let m = candidate_moves(Side::White, PieceKind::Pawn, e2);
        let expected: Vec<BoardSquare> = [(5, 3), (5, 4), (4, 3), (6, 3)]
            .iter()
            .map(|&(f, r)| BoardSquare::from_algebraic(f, r))
            .collect();
        assert_eq!(m, expected);

        // Black pawn on a7: the left diagonal is off the board
        let a7 = BoardSquare::from_algebraic(1, 7);
        let m = candidate_moves(Side::Black, PieceKind::Pawn, a7);
        let expected: Vec<BoardSquare> = [(1, 6), (1, 5), (2, 6)]
            .iter()
            .map(|&(f, r)| BoardSquare::from_algebraic(f, r))
            .collect();
        assert_eq!(m, expected);
    }

    #[test]
    fn test_pawn_on_last_rank_has_no_moves() {
        let m = candidate_moves(Side::White, PieceKind::Pawn, sq(3, 0));
        assert!(m.is_empty());
    }

    #[test]
    fn test_set_position_rejects_unlisted_square() {
        let mut knight = ChessPiece::new(Side::White, PieceKind::Knight, sq(4, 4));
        assert!(!knight.set_position(sq(4, 5)));
        assert_eq!(knight.position(), sq(4, 4));
        assert!(!knight.set_position(sq(9, 9)));
        assert_eq!(knight.position(), sq(4, 4));
    }

    #[test]
    fn test_set_position_accepts_listed_square() {
        let mut knight = ChessPiece::new(Side::White, PieceKind::Knight, sq(4, 4));
        assert!(knight.set_position(sq(6, 5)));
        assert_eq!(knight.position(), sq(6, 5));
        // Moves are regenerated from the new square
        assert!(knight.set_position(sq(7, 7)));
    }

    #[test]
    fn test_sprite_file_name() {
        let piece = ChessPiece::new(Side::Black, PieceKind::Queen, sq(3, 0));
        assert_eq!(piece.sprite_file(), "black_queen.png");
    }

    #[test]
    fn test_piece_actor_layout() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::new(18, 18).save(dir.path().join("white_rook.png")).unwrap();
        let mut sprites = SpriteLibrary::with_dir(dir.path());
        let mut ids = IdAllocator::new();

        let a1 = BoardSquare::from_algebraic(1, 1);
        let actor = piece_actor(&mut ids, &mut sprites, Side::White, PieceKind::Rook, a1).unwrap();

        assert_eq!(actor.actor_type(), ACTOR_TYPE_CHESS_PIECE);
        assert_eq!(actor.id().as_str(), "piece-white-rook0");
        assert_eq!(actor.worldly().unwrap().position(), a1.piece_origin());
        assert_eq!(actor.worldly().unwrap().scale(), (PIECE_WIDTH, PIECE_HEIGHT));
        assert_eq!(actor.chess_piece().unwrap().position(), a1);
    }

    #[test]
    fn test_piece_actor_missing_sprite_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut sprites = SpriteLibrary::with_dir(dir.path());
        let mut ids = IdAllocator::new();
        let result = piece_actor(&mut ids, &mut sprites, Side::Black, PieceKind::King, sq(4, 0));
        assert!(matches!(result, Err(GameError::Sprite { .. })));
    }
}
