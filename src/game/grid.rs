//! Board geometry in cell units.
//!
//! The hosting environment measures the playable area in pixels; everything
//! here converts that to whole cells once so that the engine never sees a
//! pixel or a float.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Size of the playable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: u32,
    pub height: u32,
}

impl BoardSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// Number of whole cells that fit across `board_pixels`
pub fn cells_across(board_pixels: u32, cell_scale: u32) -> u32 {
    board_pixels.checked_div(cell_scale).unwrap_or(0)
}

/// Starting cell for a board of the given pixel size.
///
/// floor(pixels / (2 * scale)) on each axis, clamped into the grid.
pub fn center_cell(board: BoardSize, cell_scale: u32) -> Cell {
    let axis = |pixels: u32| -> i32 {
        let across = cells_across(pixels, cell_scale);
        let half = (pixels as u64)
            .checked_div(2 * cell_scale as u64)
            .unwrap_or(0);
        half.min(across.saturating_sub(1) as u64) as i32
    };
    Cell::new(axis(board.width), axis(board.height))
}

/// Grid bounds in cells; fixed for the duration of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Returns `None` for a grid with no cells
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Derive a grid from a measured board; `None` when not even one cell fits
    pub fn from_board(board: BoardSize, cell_scale: u32) -> Option<Self> {
        Self::new(
            cells_across(board.width, cell_scale),
            cells_across(board.height, cell_scale),
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a cell is within `[0, width) x [0, height)`
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Cell::new(x, y)))
    }
}
