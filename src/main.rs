use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;

use ball_roller::{GameConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(author, version, about = "3D rolling-ball platformer", long_about = None)]
struct Args {
    /// Base config file (RON). A sibling `game.local.ron` overlay is applied on top.
    #[arg(long, default_value = "assets/config/game.ron")]
    config: String,
    /// Force a windowed (non-fullscreen) start regardless of config.
    #[arg(long)]
    windowed: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let overlay = overlay_path(&args.config);
    let (cfg, used, errors) = GameConfig::load_layered([args.config.as_str(), overlay.as_str()]);
    for e in &errors {
        eprintln!("config: {e}");
    }
    for w in cfg.validate() {
        eprintln!("config warning: {w}");
    }
    cfg.reject_invalid()
        .with_context(|| format!("invalid configuration (from {used:?})"))?;

    let mut window = Window {
        title: cfg.window.title.clone(),
        resolution: (cfg.window.width, cfg.window.height).into(),
        resizable: true,
        ..default()
    };
    if args.windowed {
        window.mode = bevy::window::WindowMode::Windowed;
    }

    App::new()
        .insert_resource(cfg)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .add_plugins(GamePlugin)
        .run();
    Ok(())
}

fn overlay_path(base: &str) -> String {
    match base.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}.local.{ext}"),
        None => format!("{base}.local"),
    }
}
