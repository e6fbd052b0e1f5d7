//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Coordinates are whole cells; pixels only exist at the board-size boundary.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod score;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::{Axis, Direction, DirectionController};
pub use engine::{CollisionType, Phase, SnakeEngine, StartOutcome, TickOutcome};
pub use error::EngineError;
pub use food::FoodPlacer;
pub use grid::{center_cell, cells_across, BoardSize, Cell, Grid};
pub use score::{FinalScore, ScoreKeeper};
pub use snake::Snake;
