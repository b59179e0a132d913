//! Erase-then-paint diff rendering
//!
//! The surface is never cleared. Each particle erases the 2-wide glyph at its
//! previous position, then paints one at its current position, in population
//! order. Coordinates are truncated to cell indices; cells that fall outside
//! the grid are skipped.

use glam::DVec2;

use super::surface::{ColorIndex, DisplaySurface};
use crate::error::Result;
use crate::sim::Particle;

/// Glyph used to erase a cell
pub const ERASE_GLYPH: char = ' ';

/// Draw one frame of particle moves, then flush
pub fn render_diff<S>(particles: &[Particle], surface: &mut S, glyph: char) -> Result<()>
where
    S: DisplaySurface + ?Sized,
{
    for p in particles {
        draw_wide(surface, p.pos_last, ERASE_GLYPH, ColorIndex::BACKGROUND)?;
        draw_wide(surface, p.pos, glyph, ColorIndex::for_kind(p.kind))?;
    }
    surface.flush()
}

/// Truncate a coordinate to a cell index, if it lands inside `extent`
#[inline]
fn cell_index(coord: f64, extent: usize) -> Option<usize> {
    let cell = coord.trunc();
    if cell >= 0.0 && cell < extent as f64 {
        Some(cell as usize)
    } else {
        None
    }
}

/// A glyph covers its own column and the one to its left
fn draw_wide<S>(surface: &mut S, pos: DVec2, glyph: char, color: ColorIndex) -> Result<()>
where
    S: DisplaySurface + ?Sized,
{
    let Some(row) = cell_index(pos.x, surface.height()) else {
        return Ok(());
    };
    let col = pos.y.trunc();
    for c in [col, col - 1.0] {
        if let Some(c) = cell_index(c, surface.width()) {
            surface.set_cell(row, c, glyph, color)?;
        }
    }
    Ok(())
}
