//! Term Snake - single-player Snake for the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - Per-session statistics (metrics module)
//! - The interactive event loop and tick timer (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
