use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    action::Direction,
    config::GameConfig,
    error::{GameError, Result},
    state::{CollisionType, GameState, GameStatus, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the snake filled the last free cell this step
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Reset the game to initial state: one segment in the centre, heading right
    pub fn reset(&mut self) -> Result<GameState> {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(Position::new(center_x, center_y), Direction::Right, 1);
        let food = self.spawn_food(&snake)?;

        log::info!(
            "new game on {}x{} grid, food at ({}, {})",
            self.config.grid_width,
            self.config.grid_height,
            food.x,
            food.y
        );

        Ok(GameState::new(
            snake,
            food,
            self.config.grid_width,
            self.config.grid_height,
        ))
    }

    /// Queue a heading change for the next step.
    ///
    /// A reversal of the committed heading is dropped, even if another
    /// direction was queued earlier in the same tick.
    pub fn request_direction(&self, state: &mut GameState, direction: Direction) {
        if state.is_terminal() {
            return;
        }

        if state.snake.direction.is_opposite(direction) {
            log::debug!(
                "ignoring reversal {} while heading {}",
                direction,
                state.snake.direction
            );
            return;
        }

        state.pending_direction = Some(direction);
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.is_terminal() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        // Checked against the pre-move body, tail cell included
        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.status = GameStatus::Crashed(collision_type);
            state.steps += 1;
            log::info!(
                "game over ({:?}) with score {} after {} steps",
                collision_type,
                state.score,
                state.steps
            );

            return StepResult {
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..StepInfo::default()
                },
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        let mut info = StepInfo {
            ate_food,
            ..StepInfo::default()
        };

        if ate_food {
            state.score += 1;
            match self.spawn_food(&state.snake) {
                Ok(food) => state.food = food,
                Err(err) => {
                    log::info!("{err}: board cleared with score {}", state.score);
                    state.status = GameStatus::BoardCleared;
                    info.board_full = true;
                }
            }
        }

        StepResult {
            terminated: state.is_terminal(),
            info,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food on a free cell of the configured grid, drawing uniformly and
    /// retrying until the draw misses the snake.
    fn spawn_food(&mut self, snake: &Snake) -> Result<Position> {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        if snake.len() >= self.config.cell_count() {
            return Err(GameError::BoardFull);
        }

        loop {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Ok(pos);
            }
        }
    }
}
