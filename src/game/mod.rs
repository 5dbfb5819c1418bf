//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{FruitPlacement, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use state::{Cell, CollisionType, GameState, Phase, Snake};
