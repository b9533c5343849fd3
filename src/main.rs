//! Bullet Hell Chess
//!
//! A chess board on a small actor/component/scene framework:
//! - Fixed 500x700 logical canvas, letterboxed into the window
//! - Four render layers drawn back to front every frame
//! - Click a piece to see where it may go, click a square to move it
//! - Escape quits

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod chess;
mod config;
mod error;
mod game;
mod logging;
mod scene;
mod texture;
mod ui;

use macroquad::prelude::*;

use app::Game;
use chess::required_sprites;
use config::GameConfig;
use error::GameError;
use game::ScreenCanvas;
use texture::SpriteFiles;
use ui::{FrameInput, Viewport};

fn window_conf() -> Conf {
    // Logging is not up yet; a bad config is reported again by main
    let config = GameConfig::load_default_location().unwrap_or_default();
    Conf {
        window_title: config.window_title,
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let config = match GameConfig::load_default_location() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            log::error!("failed to load {}: {}", GameConfig::path().display(), e);
            std::process::exit(1);
        }
    };
    logging::init(&config.log_filter);
    log::info!("=== Bullet Hell Chess v{} ===", VERSION);

    if let Err(e) = run(config).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    log::info!("bye");
}

async fn run(config: GameConfig) -> Result<(), GameError> {
    let files = SpriteFiles::fetch(&config.asset_dir, &required_sprites()).await?;
    let mut game = Game::new(config, files)?;
    let mut canvas = ScreenCanvas::new();

    loop {
        if game.should_stop() {
            break;
        }

        let viewport = Viewport::fit(screen_width(), screen_height());
        let input = FrameInput::poll(&viewport);
        game.update(&input)?;

        clear_background(BLACK);
        canvas.begin_frame(viewport);
        game.draw(&mut canvas)?;

        next_frame().await;
    }
    Ok(())
}
