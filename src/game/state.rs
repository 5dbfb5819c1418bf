use std::collections::VecDeque;

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Cell>,
}

impl Snake {
    /// Build a snake from its cells, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// The starting snake: a vertical line below `top`, head at the bottom.
    pub fn vertical(top: Cell, length: usize) -> Self {
        let length = length.max(1);
        let body = (0..length as i32)
            .rev()
            .map(|i| top.moved_by(0, i))
            .collect();
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter().skip(1)
    }

    /// All cells, head first
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Check if a cell collides with the snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().any(|&segment| segment == cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
}

/// Whether the game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub fruit: Cell,
    /// Direction the next step moves in
    pub direction: Direction,
    /// Direction the last step moved in
    pub heading: Direction,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub game_over: bool,
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a running game state
    pub fn new(snake: Snake, fruit: Cell, direction: Direction, grid_size: usize) -> Self {
        Self {
            snake,
            fruit,
            direction,
            heading: direction,
            grid_size,
            score: 0,
            steps: 0,
            game_over: false,
            collision: None,
        }
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        let size = self.grid_size as i32;
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_vertical_snake() {
        let snake = Snake::vertical(Cell::new(10, 10), 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(10, 12));
        assert_eq!(snake.tail(), Cell::new(10, 10));
        let cells: Vec<Cell> = snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![Cell::new(10, 12), Cell::new(10, 11), Cell::new(10, 10)]
        );
    }

    #[test]
    fn test_empty_snake_rejected() {
        assert!(Snake::from_cells(Vec::new()).is_none());
        assert_eq!(Snake::vertical(Cell::new(0, 0), 0).len(), 1);
    }

    #[test]
    fn test_snake_advance() {
        let mut snake =
            Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]).unwrap();

        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake =
            Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]).unwrap();
        assert!(!snake.collides_with_body(Cell::new(5, 5))); // head
        assert!(snake.collides_with_body(Cell::new(4, 5))); // body
        assert!(!snake.collides_with_body(Cell::new(10, 10)));
        assert!(snake.contains(Cell::new(5, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::vertical(Cell::new(5, 5), 3),
            Cell::new(10, 10),
            Direction::Right,
            20,
        );

        assert!(state.is_in_bounds(Cell::new(0, 0)));
        assert!(state.is_in_bounds(Cell::new(19, 19)));
        assert!(!state.is_in_bounds(Cell::new(-1, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, -1)));
        assert!(!state.is_in_bounds(Cell::new(20, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, 20)));
        assert_eq!(state.phase(), Phase::Running);
    }
}
