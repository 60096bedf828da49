//! Session configuration: grid, classifier thresholds and tick rate.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{GameConfig, GameError};
use crate::gesture::ClassifierConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("tick interval must be positive")]
    ZeroTick,
}

/// Everything a play session needs, loadable from JSON.
///
/// Missing fields fall back to their defaults:
///
/// ```json
/// { "game": { "grid_width": 20, "grid_height": 15 }, "tick_millis": 120 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub game: GameConfig,
    pub classifier: ClassifierConfig,
    /// Milliseconds between game steps
    pub tick_millis: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            classifier: ClassifierConfig::default(),
            tick_millis: 100,
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        if self.tick_millis == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}
