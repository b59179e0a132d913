//! In-memory display surface for headless runs and tests

use super::surface::{ColorIndex, DisplaySurface};
use crate::error::{Error, Result};

/// Contents of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: ColorIndex,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: ColorIndex::BACKGROUND,
    };
}

/// A row-major grid of cells that never clears itself
#[derive(Debug, Clone)]
pub struct BufferSurface {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    /// Cell writes accepted (in range)
    pub draws: u64,
    pub flushes: u64,
}

impl BufferSurface {
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(Error::EmptySurface { height, width });
        }
        Ok(Self {
            height,
            width,
            cells: vec![Cell::BLANK; height * width],
            draws: 0,
            flushes: 0,
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Number of cells currently showing `color`
    pub fn count_color(&self, color: ColorIndex) -> usize {
        self.cells.iter().filter(|c| c.color == color).count()
    }
}

impl DisplaySurface for BufferSurface {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn set_cell(&mut self, row: usize, col: usize, glyph: char, color: ColorIndex) -> Result<()> {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = Cell { glyph, color };
            self.draws += 1;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
