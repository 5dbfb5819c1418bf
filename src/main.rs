use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};
use term_snake::app::App;
use term_snake::game::{FruitPlacement, GameConfig, GameEngine};

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Single-player Snake in the terminal")]
struct Cli {
    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side of the square grid, in cells
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between two steps
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Length of the snake at the start of a game
    #[arg(long)]
    initial_length: Option<usize>,

    /// Never place fruit on the snake
    #[arg(long)]
    avoid_snake: bool,

    /// Also reject turns opposite to the last move
    #[arg(long)]
    block_quick_reversal: bool,

    /// Seed for reproducible fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level for the log file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// File settings first, then command line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(initial_length) = self.initial_length {
            config.initial_length = initial_length;
        }
        if self.avoid_snake {
            config.fruit_placement = FruitPlacement::AvoidSnake;
        }
        if self.block_quick_reversal {
            config.block_quick_reversal = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level, Config::default(), file).context("Failed to initialize logger")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level)?;
    }

    let config = cli.game_config()?;
    let (width, height) = config.display_size();
    info!(
        "Starting {}x{} grid ({}x{} display units), tick {} ms",
        config.grid_size, config.grid_size, width, height, config.tick_interval_ms
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut app = App::with_engine(engine);
    app.run().await
}
