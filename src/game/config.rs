use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::grid::{cells_across, BoardSize, Grid};

/// Largest grid side, in cells, a configuration may ask for
pub const MAX_GRID_SIDE: u32 = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playable area in pixels. `None` lets the host measure it (the
    /// terminal front end fits the board to the window).
    pub board: Option<BoardSize>,
    /// Pixels per cell
    pub cell_scale: u32,
    /// Time between ticks in milliseconds
    pub tick_interval_ms: u64,
    /// Seed for food placement; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: Some(BoardSize::square(480)),
            cell_scale: 20,
            tick_interval_ms: 200,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a fixed board size in pixels
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            board: Some(BoardSize::new(width, height)),
            ..Default::default()
        }
    }

    /// Create a small board for testing (10x10 cells)
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Board measured by the host instead of fixed up front
    pub fn fit_to_host() -> Self {
        Self {
            board: None,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Grid for the fixed board, if any
    pub fn grid(&self) -> Option<Grid> {
        self.board
            .and_then(|board| Grid::from_board(board, self.cell_scale))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_scale == 0 {
            return Err("cell_scale must be at least 1".to_string());
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        if let Some(board) = self.board {
            let across = cells_across(board.width, self.cell_scale);
            let down = cells_across(board.height, self.cell_scale);

            if across == 0 || down == 0 {
                return Err(format!(
                    "board {}x{} is smaller than one {}px cell",
                    board.width, board.height, self.cell_scale
                ));
            }

            if across > MAX_GRID_SIDE || down > MAX_GRID_SIDE {
                return Err(format!(
                    "board {}x{} at {}px per cell is a {}x{} grid, more than {} cells on a side",
                    board.width, board.height, self.cell_scale, across, down, MAX_GRID_SIDE
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board, Some(BoardSize::square(480)));
        assert_eq!(config.cell_scale, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));

        let grid = config.grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (24, 24));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::fit_to_host().validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 200);
        let grid = config.grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (15, 10));
    }

    #[test]
    fn test_validation_zero_scale() {
        let config = GameConfig {
            cell_scale: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_tick() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_board_smaller_than_cell() {
        let config = GameConfig::new(10, 400);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_oversized_grid() {
        let config = GameConfig {
            board: Some(BoardSize::new(4_000_000_000, 100)),
            cell_scale: 1,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("more than 1000 cells"));

        let tall = GameConfig {
            board: Some(BoardSize::new(100, MAX_GRID_SIDE + 1)),
            cell_scale: 1,
            ..Default::default()
        };
        assert!(tall.validate().is_err());
    }

    #[test]
    fn test_validation_largest_grid_is_accepted() {
        let config = GameConfig {
            board: Some(BoardSize::square(MAX_GRID_SIDE * 2)),
            cell_scale: 2,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "cell_scale": 10, "seed": 7 }"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();

        assert_eq!(config.cell_scale, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.board, Some(BoardSize::square(480)));
        assert_eq!(config.tick_interval_ms, 200);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(GameConfig::from_file(&dir.path().join("absent.json")).is_err());
    }
}
