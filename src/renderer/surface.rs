//! Display surface contract and color palette

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Index into a [`Palette`]. `0` is the background; kind `k` paints with `k + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    pub const BACKGROUND: ColorIndex = ColorIndex(0);

    #[inline]
    pub fn for_kind(kind: u8) -> Self {
        ColorIndex(kind.saturating_add(1))
    }
}

/// Backend-independent color names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Grey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    DarkGrey,
}

/// Default palette: black background, then one color per kind
pub const DEFAULT_PALETTE: [ColorToken; 6] = [
    ColorToken::Black,
    ColorToken::Red,
    ColorToken::Green,
    ColorToken::Yellow,
    ColorToken::Blue,
    ColorToken::Magenta,
];

/// Kind-to-color mapping covering exactly the background plus every kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<ColorToken>,
}

impl Palette {
    pub fn new(colors: Vec<ColorToken>, n_types: u8) -> Result<Self> {
        let expected = n_types as usize + 1;
        if colors.len() != expected {
            return Err(Error::Palette {
                expected,
                found: colors.len(),
            });
        }
        Ok(Self { colors })
    }

    pub fn background(&self) -> ColorToken {
        self.colors[0]
    }

    /// Color for an index; unknown indices fall back to the background
    pub fn get(&self, index: ColorIndex) -> ColorToken {
        self.colors
            .get(index.0 as usize)
            .copied()
            .unwrap_or_else(|| self.background())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// A persistent grid of character cells.
///
/// Cells keep whatever was last drawn until overwritten. Writes outside the
/// grid are ignored.
pub trait DisplaySurface {
    fn height(&self) -> usize;

    fn width(&self) -> usize;

    /// Set one cell's glyph and color
    fn set_cell(&mut self, row: usize, col: usize, glyph: char, color: ColorIndex) -> Result<()>;

    /// Make pending draws visible
    fn flush(&mut self) -> Result<()>;
}
