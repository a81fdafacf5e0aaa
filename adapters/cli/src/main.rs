#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Snake experience.

mod settings;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use snake_core::{GameConfig, WELCOME_BANNER};
use snake_rendering::{Color, Presentation, RenderingBackend};
use snake_rendering_macroquad::MacroquadBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;

use self::simulation::Simulation;

#[derive(Debug, Parser)]
#[command(name = "snake")]
#[command(version, about = "Grid snake with a fixed-interval game loop")]
struct Cli {
    /// TOML file with game parameters. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Edge length of a cell in pixels
    #[arg(long)]
    cell_size: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Synchronise presentation with the display refresh rate
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,

    /// Log the frame rate once per second
    #[arg(long)]
    show_fps: bool,

    /// Disable cue playback
    #[arg(long)]
    mute: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = settings::load(self.config.as_deref())?;
        if let Some(width) = self.width {
            config.canvas_width = width;
        }
        if let Some(height) = self.height {
            config.canvas_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter `{level}`"))?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Entry point for the Snake command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = cli.resolve_config()?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, "{WELCOME_BANNER}");

    let mut simulation =
        Simulation::new(&config, seed).context("invalid game configuration")?;
    let scene = simulation
        .initial_scene()
        .context("failed to describe the initial scene")?;
    let presentation = Presentation::new("Snake", Color::from_rgb_u8(18, 18, 24), scene);

    MacroquadBackend::new()
        .with_vsync(cli.vsync)
        .with_show_fps(cli.show_fps)
        .with_audio(!cli.mute)
        .run(presentation, move |dt, input, scene| {
            simulation.frame(dt, input, scene);
        })
}
