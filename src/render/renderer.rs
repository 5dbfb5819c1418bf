use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState};
use crate::metrics::GameMetrics;

/// Terminal columns per grid cell; one row per cell keeps tiles roughly square
const TILE_WIDTH: u16 = 2;

const HEAD: &str = "◆ ";
const BODY: &str = "■ ";
const FRUIT: &str = "● ";
const EMPTY: &str = "  ";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Head,
    Body,
    Fruit,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        if state.game_over {
            self.render_game_over(frame, state, metrics);
            return;
        }

        let [header, game_area, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(self.render_stats(state, metrics), header);

        let playfield = Self::playfield_area(game_area, state.grid_size);
        frame.render_widget(self.render_grid(state), playfield);

        frame.render_widget(self.render_controls(), footer);
    }

    /// Fixed-size area for the bordered grid, centered in `area`
    fn playfield_area(area: Rect, grid_size: usize) -> Rect {
        let side = u16::try_from(grid_size).unwrap_or(u16::MAX);
        let width = side.saturating_mul(TILE_WIDTH).saturating_add(2);
        let height = side.saturating_add(2);

        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [playfield] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);
        playfield
    }

    fn tiles(state: &GameState) -> Vec<Vec<Tile>> {
        let mut tiles = vec![vec![Tile::Empty; state.grid_size]; state.grid_size];
        let mut put = |cell: Cell, tile: Tile| {
            if state.is_in_bounds(cell) {
                tiles[cell.y as usize][cell.x as usize] = tile;
            }
        };

        // Later writes win: the snake covers a fruit placed under it
        put(state.fruit, Tile::Fruit);
        for &segment in state.snake.body_segments() {
            put(segment, Tile::Body);
        }
        put(state.snake.head(), Tile::Head);

        tiles
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = Self::tiles(state)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|tile| match tile {
                        Tile::Head => Span::styled(
                            HEAD,
                            Style::default()
                                .fg(Color::LightGreen)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Tile::Body => Span::styled(BODY, Style::default().fg(Color::Green)),
                        Tile::Fruit => Span::styled(
                            FRUIT,
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Tile::Empty => Span::raw(EMPTY),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.elapsed_label(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score().to_string(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let text = vec![
            Line::from(Span::styled(
                format!("Game Over! Score: {}", state.score),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press R to Restart or X to Quit",
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Best: {}    Games: {}",
                    metrics.high_score(),
                    metrics.games_played()
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let [area] = Layout::vertical([Constraint::Length(text.len() as u16)])
            .flex(Flex::Center)
            .areas(frame.area());
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Press X to Quit", Style::default().fg(Color::Red)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
