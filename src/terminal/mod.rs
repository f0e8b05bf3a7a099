//! Terminal access for interactive input.
//!
//! [`Terminal`] is the raw key/cursor surface used by the line reader;
//! [`Console`] is the line-level surface used by prompts.

pub mod backend;
pub mod console;
pub mod reader;
#[cfg(test)]
pub(crate) mod scripted;

pub use self::backend::{CrosstermTerminal, RawModeGuard};
pub use self::console::{Console, StdConsole, TerminalConsole};
pub use self::reader::LineReader;

use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    F(u8),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c),
            ctrl: true,
            alt: false,
        }
    }

    pub fn is_interrupt(&self) -> bool {
        self.ctrl && matches!(self.key, Key::Char('c' | 'C'))
    }
}

/// Key polling and cursor control of a terminal in raw mode.
/// Coordinates are zero-based `(column, row)`.
pub trait Terminal {
    /// Wait up to `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyPress>>;
    fn cursor(&mut self) -> Result<(u16, u16)>;
    fn width(&mut self) -> Result<u16>;
    fn move_to(&mut self, column: u16, row: u16) -> Result<()>;
    fn write(&mut self, text: &str) -> Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;
}

/// Cursor position `count` cells before `(column, row)` on a screen of the
/// given width, wrapping to previous rows and stopping at the origin.
pub fn rewind_position(column: u16, row: u16, width: u16, count: usize) -> (u16, u16) {
    let width = usize::from(width.max(1));
    let offset = usize::from(row) * width + usize::from(column);
    let target = offset.saturating_sub(count);
    ((target % width) as u16, (target / width) as u16)
}
