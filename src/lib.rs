//! Grid Snake - classic snake on a discrete grid
//!
//! This library provides:
//! - Core game logic (game module): geometry, food placement, steering, the tick engine and scoring
//! - High score persistence (persistence module)
//! - TUI rendering and input translation (render, input modules)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod persistence;
pub mod render;
