//! Tunable game parameters and their validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{GridGeometry, Progression};

/// Tunable parameters describing the playfield and the speed curve.
///
/// Every field has a default so partially specified configuration files
/// deserialize cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the drawing surface in pixels.
    pub canvas_width: u32,
    /// Height of the drawing surface in pixels.
    pub canvas_height: u32,
    /// Edge length of a single cell in pixels.
    pub cell_size: u32,
    /// Delay between ticks at level one, in milliseconds.
    pub initial_interval_ms: u64,
    /// Amount shaved off the delay per level, in milliseconds.
    pub interval_step_ms: u64,
    /// Lower bound for the delay, in milliseconds.
    pub min_interval_ms: u64,
    /// Score needed per level.
    pub points_per_level: u32,
    /// Seed for food placement. A random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 400,
            cell_size: 20,
            initial_interval_ms: 150,
            interval_step_ms: 10,
            min_interval_ms: 50,
            points_per_level: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Grid derived from the canvas and cell size.
    #[must_use]
    pub const fn grid(&self) -> GridGeometry {
        GridGeometry::from_canvas(self.canvas_width, self.canvas_height, self.cell_size)
    }

    /// Speed curve described by the interval fields.
    #[must_use]
    pub const fn progression(&self) -> Progression {
        Progression::new(
            Duration::from_millis(self.initial_interval_ms),
            Duration::from_millis(self.interval_step_ms),
            Duration::from_millis(self.min_interval_ms),
            self.points_per_level,
        )
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        let grid = self.grid();
        if grid.columns() == 0 || grid.rows() == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.canvas_width,
                height: self.canvas_height,
                cell_size: self.cell_size,
            });
        }

        // One cell for the snake and one for the food.
        if grid.capacity() < 2 {
            return Err(ConfigError::GridTooSmall {
                capacity: grid.capacity(),
            });
        }

        if self.initial_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroFloor);
        }

        if self.min_interval_ms > self.initial_interval_ms {
            return Err(ConfigError::FloorAboveInitial {
                floor_ms: self.min_interval_ms,
                initial_ms: self.initial_interval_ms,
            });
        }

        if self.points_per_level == 0 {
            return Err(ConfigError::ZeroPointsPerLevel);
        }

        Ok(())
    }
}

/// Reasons a [`GameConfig`] cannot be played.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Cells must have a positive edge length.
    #[error("cell_size must be positive")]
    ZeroCellSize,
    /// The canvas is smaller than a single cell along one axis.
    #[error("a {width}x{height} canvas holds no {cell_size}px cells")]
    EmptyGrid {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
        /// Requested cell size in pixels.
        cell_size: u32,
    },
    /// The grid cannot hold a snake and a piece of food.
    #[error("grid holds {capacity} cell(s); at least 2 are required")]
    GridTooSmall {
        /// Number of cells in the derived grid.
        capacity: usize,
    },
    /// The level-one interval must be positive.
    #[error("initial_interval_ms must be positive")]
    ZeroInterval,
    /// The interval floor must be positive.
    #[error("min_interval_ms must be positive")]
    ZeroFloor,
    /// The floor cannot exceed the starting interval.
    #[error("min_interval_ms ({floor_ms}) exceeds initial_interval_ms ({initial_ms})")]
    FloorAboveInitial {
        /// Configured floor in milliseconds.
        floor_ms: u64,
        /// Configured starting interval in milliseconds.
        initial_ms: u64,
    },
    /// Levels need a positive score threshold.
    #[error("points_per_level must be positive")]
    ZeroPointsPerLevel,
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GameConfig};

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.grid().columns(), 20);
        assert_eq!(config.grid().rows(), 20);
    }

    #[test]
    fn rejects_zero_cell_size() {
        let config = GameConfig {
            cell_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    fn rejects_canvas_smaller_than_a_cell() {
        let config = GameConfig {
            canvas_width: 10,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { width: 10, .. })
        ));
    }

    #[test]
    fn rejects_single_cell_grid() {
        let config = GameConfig {
            canvas_width: 20,
            canvas_height: 20,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall { capacity: 1 })
        );
    }

    #[test]
    fn rejects_floor_above_initial_interval() {
        let config = GameConfig {
            initial_interval_ms: 40,
            min_interval_ms: 50,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::FloorAboveInitial {
                floor_ms: 50,
                initial_ms: 40,
            })
        );
    }

    #[test]
    fn rejects_zero_points_per_level() {
        let config = GameConfig {
            points_per_level: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPointsPerLevel));
    }
}
