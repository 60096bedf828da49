//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The tick loop owns a [`GameState`] and threads it through
//! [`GameEngine::request_direction`] and [`GameEngine::step`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
