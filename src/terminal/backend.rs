//! [`Terminal`] backed by crossterm on stdout.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::{execute, queue};

use crate::error::Result;
use crate::terminal::{Key, KeyPress, Terminal};

/// Raw mode for as long as the guard lives.
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub struct CrosstermTerminal {
    out: Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn key_press(event: KeyEvent) -> Option<KeyPress> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Other,
    };
    Some(KeyPress {
        key,
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
    })
}

impl Terminal for CrosstermTerminal {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<KeyPress>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(key_press(key)),
            _ => Ok(None),
        }
    }

    fn cursor(&mut self) -> Result<(u16, u16)> {
        Ok(cursor::position()?)
    }

    fn width(&mut self) -> Result<u16> {
        Ok(terminal::size()?.0)
    }

    fn move_to(&mut self, column: u16, row: u16) -> Result<()> {
        execute!(self.out, MoveTo(column, row))?;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        queue!(self.out, crossterm::style::Print(text))?;
        self.out.flush()?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            execute!(self.out, cursor::Show)?;
        } else {
            execute!(self.out, cursor::Hide)?;
        }
        Ok(())
    }
}
