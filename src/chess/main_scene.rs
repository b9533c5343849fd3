//! Scene builders: the playable board and the empty stop scene

use super::board::board_actor;
use super::piece::{piece_actor, PieceKind, Side};
use super::selection::MoveSelection;
use super::BoardSquare;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Actor, ActorId, Drawable, RenderLayer, Worldly};
use crate::scene::{Scene, START_SCENE_ID, STOP_SCENE_ID};
use crate::texture::{SpriteFiles, SpriteLibrary};
use crate::ui::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub const ACTOR_TYPE_BACKGROUND: &str = "actor-background-image";
pub const BACKGROUND_ACTOR_ID: &str = "scene-background";
pub const BACKGROUND_SPRITE: &str = "bg.png";
pub const BOARD_SPRITE: &str = "board.png";

/// One sprite file name per line, also read by `cargo xtask check-assets`
const SPRITE_MANIFEST: &str = include_str!("sprites.txt");

/// Back rank from file a to h
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Every piece of the standard opening position as (side, type, square)
pub fn starting_layout() -> Vec<(Side, PieceKind, BoardSquare)> {
    let mut layout = Vec::with_capacity(32);
    for side in [Side::White, Side::Black] {
        let (back, pawns) = match side {
            Side::White => (1, 2),
            Side::Black => (8, 7),
        };
        for file in 1..=8 {
            layout.push((side, PieceKind::Pawn, BoardSquare::from_algebraic(file, pawns)));
        }
        for (file, kind) in (1..=8).zip(BACK_RANK) {
            layout.push((side, kind, BoardSquare::from_algebraic(file, back)));
        }
    }
    layout
}

/// Every sprite file the main scene loads
pub fn required_sprites() -> Vec<String> {
    SPRITE_MANIFEST
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn background_actor(sprites: &mut SpriteLibrary) -> Result<Actor, GameError> {
    let sprite = sprites.load(BACKGROUND_SPRITE)?;
    Ok(Actor::new(ACTOR_TYPE_BACKGROUND, ActorId::from(BACKGROUND_ACTOR_ID))
        .with(Drawable::new(sprite, RenderLayer::Background))
        .with(Worldly::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT, 0.0)))
}

/// The board with all 32 pieces in their starting squares
pub fn build_main_scene(config: &GameConfig, files: &SpriteFiles) -> Result<Scene, GameError> {
    let mut sprites = SpriteLibrary::with_files(&config.asset_dir, files.clone());
    let mut scene = Scene::new(START_SCENE_ID);

    scene.add_actor(background_actor(&mut sprites)?);
    for (side, kind, square) in starting_layout() {
        let piece = piece_actor(scene.ids_mut(), &mut sprites, side, kind, square)?;
        scene.add_actor(piece);
    }
    scene.add_actor(board_actor(sprites.load(BOARD_SPRITE)?));
    scene.add_system(MoveSelection::new(config.show_move_hints));

    log::debug!("loaded {} sprites from {}", sprites.len(), sprites.base_dir().display());
    Ok(scene)
}

pub fn build_stop_scene() -> Result<Scene, GameError> {
    Ok(Scene::new(STOP_SCENE_ID))
}
