use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How a new fruit cell is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitPlacement {
    /// Any cell of the grid, including ones under the snake
    #[default]
    Anywhere,
    /// Re-roll until the cell is not occupied by the snake
    AvoidSnake,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square game grid, in cells
    pub grid_size: usize,
    /// Nominal size of one cell in display units
    pub tile_size: usize,
    /// Initial length of the snake
    pub initial_length: usize,
    /// Time between two simulation steps
    pub tick_interval_ms: u64,
    /// Fruit placement policy
    pub fruit_placement: FruitPlacement,
    /// Also reject turns opposite to the last move, so two quick presses
    /// within one tick cannot fold the snake back onto its neck
    pub block_quick_reversal: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tile_size: 30,
            initial_length: 3,
            tick_interval_ms: 200,
            fruit_placement: FruitPlacement::Anywhere,
            block_quick_reversal: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot start a game with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.grid_size > 0, "grid_size must be positive");
        ensure!(self.initial_length > 0, "initial_length must be positive");
        // The initial snake hangs from the centre cell downwards.
        ensure!(
            self.initial_length <= self.grid_size - self.grid_size / 2,
            "initial_length {} does not fit on a {}x{} grid",
            self.initial_length,
            self.grid_size,
            self.grid_size
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Size of the whole display area (width, height) in display units
    pub fn display_size(&self) -> (usize, usize) {
        let side = self.grid_size * self.tile_size;
        (side, side)
    }
}
