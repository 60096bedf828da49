use serde::{Deserialize, Serialize};

use super::action::Direction;

/// An integer point: a grid cell for the engine, a raw pixel sample for the
/// gesture classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Displacement from `origin` to `self`, widened so any pair of points fits
    pub fn offset_from(&self, origin: Position) -> (i64, i64) {
        (
            i64::from(self.x) - i64::from(origin.x),
            i64::from(self.y) - i64::from(origin.y),
        )
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty, never repeats a cell.
    pub body: Vec<Position>,
    /// Committed heading, applied on the next step
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let back = direction.opposite();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` when `body` is empty or repeats a cell.
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        let unique = body
            .iter()
            .enumerate()
            .all(|(i, pos)| !body[..i].contains(pos));
        unique.then_some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// RUNNING -> GAME_OVER transitions; only a reset leaves a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// The head would have left the grid or entered the body
    Crashed(CollisionType),
    /// The snake covers every cell, nowhere left to place food
    BoardCleared,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
    /// Heading requested since the last step, committed by the next step
    pub pending_direction: Option<Direction>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
            pending_direction: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Running
    }

    /// The heading the next step will use
    pub fn heading(&self) -> Direction {
        self.pending_direction.unwrap_or(self.snake.direction)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.grid_width
            && pos.y >= 0
            && (pos.y as usize) < self.grid_height
    }
}
