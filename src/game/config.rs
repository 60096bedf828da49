use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Configuration for the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Check that the grid can hold a snake and a food cell.
    ///
    /// Both dimensions must also fit in `i32`, since positions are signed.
    pub fn validate(&self) -> Result<()> {
        let fits = i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok();
        if !fits || self.grid_width == 0 || self.grid_height == 0 || self.cell_count() < 2 {
            return Err(GameError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        Ok(())
    }
}
