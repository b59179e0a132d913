//! Character-grid rendering module
//!
//! Draws particle moves as erase-then-paint diffs onto a persistent surface.

pub mod buffer;
pub mod diff;
pub mod surface;
pub mod terminal;

pub use buffer::{BufferSurface, Cell};
pub use diff::{ERASE_GLYPH, render_diff};
pub use surface::{ColorIndex, ColorToken, DEFAULT_PALETTE, DisplaySurface, Palette};
pub use terminal::TerminalSurface;
