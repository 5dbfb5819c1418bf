use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::{FruitPlacement, GameConfig},
    direction::Direction,
    state::{Cell, CollisionType, GameState, Phase, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate the fruit this step
    pub ate_fruit: bool,
    /// Collision that ended the game this step
    pub collision: Option<CollisionType>,
    /// Whether the game is over after this step
    pub terminated: bool,
}

/// The game engine that owns the state and applies the rules
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new engine and start a game
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose fruit placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create an engine continuing from an existing state
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = Self::initial_state(&config, &mut rng);
        Self { config, state, rng }
    }

    fn initial_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let center = (config.grid_size / 2) as i32;
        let snake = Snake::vertical(Cell::new(center, center), config.initial_length);
        let fruit = place_fruit(config, &snake, rng);

        GameState::new(snake, fruit, Direction::Right, config.grid_size)
    }

    /// Reset the game to its initial state
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config, &mut self.rng);
        debug!("New game, fruit at {:?}", self.state.fruit);
    }

    /// Request a new direction. Reversals of the current direction are rejected.
    ///
    /// With `block_quick_reversal` the direction of the last move is checked
    /// too.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let state = &mut self.state;
        let reverses_heading =
            self.config.block_quick_reversal && state.heading.is_opposite(direction);
        if state.game_over || state.direction.is_opposite(direction) || reverses_heading {
            debug!("Rejected turn to {:?} while going {:?}", direction, state.direction);
            return false;
        }

        state.direction = direction;
        true
    }

    /// Execute one step of the game
    pub fn step(&mut self) -> StepResult {
        if self.state.game_over {
            return StepResult {
                ate_fruit: false,
                collision: None,
                terminated: true,
            };
        }

        let direction = self.state.direction;
        let new_head = self.state.snake.head().moved_in_direction(direction);
        let ate_fruit = new_head == self.state.fruit;

        self.state.snake.advance(new_head, ate_fruit);
        if ate_fruit {
            self.state.score += 1;
            self.state.fruit = place_fruit(&self.config, &self.state.snake, &mut self.rng);
            debug!("Fruit eaten, next at {:?}", self.state.fruit);
        }

        // Collisions are judged on the body after the move
        let collision = self.check_collision(new_head);
        if let Some(collision) = collision {
            self.state.game_over = true;
            self.state.collision = Some(collision);
        }

        self.state.heading = direction;
        self.state.steps += 1;
        trace!("Step {}: head {:?}", self.state.steps, new_head);

        StepResult {
            ate_fruit,
            collision,
            terminated: self.state.game_over,
        }
    }

    fn check_collision(&self, head: Cell) -> Option<CollisionType> {
        if !self.state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }
}

/// Pick a cell for the next fruit according to the configured policy
fn place_fruit(config: &GameConfig, snake: &Snake, rng: &mut impl Rng) -> Cell {
    let size = config.grid_size as i32;
    let mut random_cell = || Cell::new(rng.gen_range(0..size), rng.gen_range(0..size));

    match config.fruit_placement {
        FruitPlacement::Anywhere => random_cell(),
        FruitPlacement::AvoidSnake => {
            // A snake filling the whole grid leaves nowhere to go
            if snake.len() >= config.grid_size * config.grid_size {
                return random_cell();
            }
            loop {
                let cell = random_cell();
                if !snake.contains(cell) {
                    return cell;
                }
            }
        }
    }
}
