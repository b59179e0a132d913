//! Crossterm terminal surface
//!
//! Owns the terminal for its lifetime: raw mode, alternate screen and a
//! hidden cursor are set up on creation and restored on drop.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use super::surface::{ColorIndex, ColorToken, DisplaySurface, Palette};
use crate::error::{Error, Result};

/// Map a palette token onto a terminal color
pub fn terminal_color(token: ColorToken) -> Color {
    match token {
        ColorToken::Black => Color::Black,
        ColorToken::Red => Color::Red,
        ColorToken::Green => Color::Green,
        ColorToken::Yellow => Color::Yellow,
        ColorToken::Blue => Color::Blue,
        ColorToken::Magenta => Color::Magenta,
        ColorToken::Cyan => Color::Cyan,
        ColorToken::White => Color::White,
        ColorToken::Grey => Color::Grey,
        ColorToken::DarkRed => Color::DarkRed,
        ColorToken::DarkGreen => Color::DarkGreen,
        ColorToken::DarkYellow => Color::DarkYellow,
        ColorToken::DarkBlue => Color::DarkBlue,
        ColorToken::DarkMagenta => Color::DarkMagenta,
        ColorToken::DarkCyan => Color::DarkCyan,
        ColorToken::DarkGrey => Color::DarkGrey,
    }
}

/// The whole terminal as a display surface
pub struct TerminalSurface {
    out: Stdout,
    height: usize,
    width: usize,
    palette: Palette,
    /// Color last sent to the terminal, to skip redundant escapes
    active: Option<ColorIndex>,
}

impl TerminalSurface {
    pub fn new(palette: Palette) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        if rows == 0 || cols == 0 {
            return Err(Error::EmptySurface {
                height: rows as usize,
                width: cols as usize,
            });
        }

        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        let setup = execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            SetBackgroundColor(terminal_color(palette.background())),
            terminal::Clear(ClearType::All)
        );
        if let Err(e) = setup {
            restore_terminal(&mut out);
            return Err(e.into());
        }

        log::info!("Terminal surface ready: {}x{}", rows, cols);

        Ok(Self {
            out,
            height: rows as usize,
            width: cols as usize,
            palette,
            active: None,
        })
    }
}

impl DisplaySurface for TerminalSurface {
    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn set_cell(&mut self, row: usize, col: usize, glyph: char, color: ColorIndex) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Ok(());
        }
        queue!(self.out, cursor::MoveTo(col as u16, row as u16))?;
        if self.active != Some(color) {
            let c = terminal_color(self.palette.get(color));
            queue!(self.out, SetBackgroundColor(c), SetForegroundColor(c))?;
            self.active = Some(color);
        }
        queue!(self.out, Print(glyph))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        restore_terminal(&mut self.out);
        log::info!("Terminal restored");
    }
}

/// Undo everything `TerminalSurface::new` sets up, ignoring failures
fn restore_terminal(out: &mut Stdout) {
    let _ = write_restore_sequence(out);
    let _ = terminal::disable_raw_mode();
}

/// Reset colors, show the cursor, re-enable wrapping and leave the alternate screen
fn write_restore_sequence<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, ResetColor, cursor::Show, EnableLineWrap, LeaveAlternateScreen)
}
