//! Interactive session: terminal setup, the event loop and teardown
//!
//! One task multiplexes the key event stream and the [`TickTimer`] with
//! `tokio::select!`, so the [`GameEngine`] only ever has a single writer.

pub mod ticker;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

use crate::game::GameEngine;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub use ticker::TickTimer;

pub struct App {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    ticker: TickTimer,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    pub fn with_engine(engine: GameEngine) -> Self {
        let ticker = TickTimer::new(engine.config().tick_interval());

        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            ticker,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Session over: {} games, best score {}",
            self.metrics.games_played(),
            self.metrics.high_score()
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        self.start_game();

        loop {
            if self.needs_redraw {
                self.draw(terminal)?;
            }

            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(event) => {
                            let event = event.context("Failed to read terminal event")?;
                            self.handle_event(event);
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = self.ticker.tick() => {
                    self.on_tick();
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let state = self.engine.state();
        let metrics = &self.metrics;
        let renderer = &self.renderer;
        terminal
            .draw(|frame| renderer.render(frame, state, metrics))
            .context("Failed to draw frame")?;
        self.needs_redraw = false;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                self.apply(action);
            }
            Event::Resize(_, _) => self.needs_redraw = true,
            _ => {}
        }
    }

    /// Apply a key action to the session
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if self.engine.set_direction(direction) {
                    self.needs_redraw = true;
                }
            }
            KeyAction::Restart => {
                if self.engine.is_game_over() {
                    self.restart();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Advance the game by one tick
    pub fn on_tick(&mut self) {
        let result = self.engine.step();
        self.needs_redraw = true;

        if result.terminated {
            self.ticker.stop();
            let state = self.engine.state();
            self.metrics.on_game_over(state.score);
            info!(
                "Game over after {} steps: score {}, {:?}",
                state.steps, state.score, state.collision
            );
        }
    }

    fn start_game(&mut self) {
        self.metrics.on_game_start();
        self.ticker.start();
        self.needs_redraw = true;
    }

    fn restart(&mut self) {
        info!("Restarting game");
        self.engine.reset();
        self.start_game();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, GameConfig, GameState, Snake};
    use ratatui::backend::TestBackend;

    fn doomed_app() -> App {
        // Head on the left wall, moving left
        let config = GameConfig::small();
        let snake =
            Snake::from_cells([Cell::new(0, 5), Cell::new(1, 5), Cell::new(2, 5)]).unwrap();
        let state = GameState::new(snake, Cell::new(8, 8), Direction::Left, config.grid_size);
        App::with_engine(GameEngine::from_state(config, state, 11))
    }

    #[tokio::test]
    async fn test_game_over_stops_ticking() {
        let mut app = doomed_app();
        app.start_game();
        assert!(app.is_ticking());

        app.on_tick();

        assert!(app.engine().is_game_over());
        assert!(!app.is_ticking());
        assert_eq!(app.metrics.games_played(), 1);
    }

    #[tokio::test]
    async fn test_restart_only_after_game_over() {
        let mut app = App::with_engine(GameEngine::with_seed(GameConfig::small(), 2));
        app.start_game();
        app.on_tick();
        let steps = app.engine().state().steps;

        app.apply(KeyAction::Restart);
        assert_eq!(app.engine().state().steps, steps);

        let mut app = doomed_app();
        app.start_game();
        app.on_tick();
        app.apply(KeyAction::Restart);

        let state = app.engine().state();
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
        assert!(app.is_ticking());
    }

    #[tokio::test]
    async fn test_turn_and_quit() {
        let mut app = App::with_engine(GameEngine::with_seed(GameConfig::small(), 2));

        app.apply(KeyAction::Turn(Direction::Left));
        assert_eq!(app.engine().state().direction, Direction::Right);

        app.apply(KeyAction::Turn(Direction::Up));
        assert_eq!(app.engine().state().direction, Direction::Up);

        app.apply(KeyAction::None);
        assert!(!app.should_quit());
        app.apply(KeyAction::Quit);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_draw_clears_redraw_flag() {
        let mut app = doomed_app();
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        assert!(app.needs_redraw);

        app.draw(&mut terminal).unwrap();
        assert!(!app.needs_redraw);

        app.start_game();
        app.on_tick();
        assert!(app.needs_redraw);
        app.draw(&mut terminal).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Game Over! Score: 0"));
    }
}
