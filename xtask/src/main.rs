//! Build automation tasks for Bullet Hell Chess
//!
//! Usage:
//!   cargo xtask check-assets    # Verify every sprite the board needs exists
//!   cargo xtask package         # Native release + assets into dist/<platform>/
//!   cargo xtask build-web       # Build WASM and stage dist/web/

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BINARY: &str = "bullet-hell-chess";
const CONFIG_FILE: &str = "bullet-hell-chess.ron";
const DEFAULT_ASSET_DIR: &str = "assets/sprites/chessboard/chess_green";

/// Sprite manifest the game embeds, one file name per line
const SPRITE_MANIFEST: &str = "src/chess/sprites.txt";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Bullet Hell Chess")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the sprite directory has every image the main scene loads
    CheckAssets {
        /// Sprite directory, relative to the project root
        #[arg(long, default_value = DEFAULT_ASSET_DIR)]
        dir: PathBuf,
    },
    /// Build a native release and copy it with assets and config
    Package {
        /// Target platform: windows, macos, linux
        #[arg(long)]
        platform: Option<String>,
    },
    /// Build WASM for web deployment
    BuildWeb,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckAssets { dir } => check_assets(&dir),
        Commands::Package { platform } => package(platform),
        Commands::BuildWeb => build_web(),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Download a file from URL to destination
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(
        Command::new("curl")
            .args(["-L", "-o"])
            .arg(dest)
            .arg(url),
    )
}

/// Copy directory recursively
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Sprite files the main scene loads, read from the manifest
fn required_sprites(root: &Path) -> Result<Vec<String>> {
    let path = root.join(SPRITE_MANIFEST);
    let manifest = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(manifest
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn check_assets(dir: &Path) -> Result<()> {
    let root = project_root()?;
    let sprites = required_sprites(&root)?;
    let dir = root.join(dir);
    let missing: Vec<&String> = sprites
        .iter()
        .filter(|file| !dir.join(file).is_file())
        .collect();

    if !missing.is_empty() {
        for file in &missing {
            eprintln!("missing: {}", dir.join(file).display());
        }
        anyhow::bail!("{} of {} sprites missing", missing.len(), sprites.len());
    }
    println!("All {} sprites present in {}", sprites.len(), dir.display());
    Ok(())
}

/// Copy assets and, when present, the config file next to a build
fn stage_runtime_files(root: &Path, dist: &Path) -> Result<()> {
    copy_dir_recursive(&root.join("assets"), &dist.join("assets"))?;
    let config = root.join(CONFIG_FILE);
    if config.exists() {
        std::fs::copy(&config, dist.join(CONFIG_FILE))?;
    }
    Ok(())
}

fn clean_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Native release build
fn package(platform: Option<String>) -> Result<()> {
    check_assets(Path::new(DEFAULT_ASSET_DIR))?;

    let root = project_root()?;
    let platform = platform.unwrap_or_else(|| {
        if cfg!(target_os = "windows") {
            "windows".to_string()
        } else if cfg!(target_os = "macos") {
            "macos".to_string()
        } else {
            "linux".to_string()
        }
    });

    let dist = root.join(format!("dist/{}", platform));

    println!("Building native release for {}...", platform);
    clean_dir(&dist)?;
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--bin", BINARY]),
    )?;

    let binary_name = if platform == "windows" {
        format!("{}.exe", BINARY)
    } else {
        BINARY.to_string()
    };
    std::fs::copy(
        root.join("target/release").join(&binary_name),
        dist.join(&binary_name),
    )
    .with_context(|| format!("copying {}", binary_name))?;

    stage_runtime_files(&root, &dist)?;

    println!("Package complete: dist/{}/", platform);
    Ok(())
}

fn index_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Bullet Hell Chess</title>
    <style>
        html, body, canvas {{ margin: 0; padding: 0; width: 100%; height: 100%; overflow: hidden; background: black; }}
    </style>
</head>
<body>
    <canvas id="glcanvas" tabindex="1"></canvas>
    <script src="mq_js_bundle.js"></script>
    <script>load("{}.wasm");</script>
</body>
</html>
"#,
        BINARY
    )
}

/// Build WASM for web deployment
fn build_web() -> Result<()> {
    check_assets(Path::new(DEFAULT_ASSET_DIR))?;

    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown", "--bin", BINARY]),
    )?;

    clean_dir(&dist)?;

    println!("Copying files to dist/web...");
    let wasm = format!("{}.wasm", BINARY);
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release").join(&wasm),
        dist.join(&wasm),
    )?;
    std::fs::write(dist.join("index.html"), index_html())?;

    // Download macroquad JS bundle
    let mq_js = dist.join("mq_js_bundle.js");
    if !mq_js.exists() {
        download_file(
            "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js",
            &mq_js,
        )?;
    }

    stage_runtime_files(&root, &dist)?;

    println!("Web build complete: dist/web/");
    Ok(())
}
