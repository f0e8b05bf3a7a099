//! Key-by-key line input on a raw-mode terminal.
//!
//! Masked input echoes `*` for every typed character. Tab or F2 shows the
//! clear text until the next key press or until the reveal timeout passes,
//! and Escape returns an empty line. Clear input echoes characters as typed.
//! In both modes Enter accepts and Ctrl-C interrupts.

use std::time::{Duration, Instant};

use tracing::trace;
use zeroize::Zeroizing;

use crate::error::{ArgbindError, Result};
use crate::locale::{Catalog, English};
use crate::terminal::{rewind_position, Key, Terminal};

pub const POLL_INTERVAL: Duration = Duration::from_millis(50);
pub const REVEAL_TIMEOUT: Duration = Duration::from_secs(3);
const MASK_CHAR: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Echo {
    Clear,
    Masked,
    Revealed { since: Instant },
}

pub struct LineReader<'t, T: Terminal + ?Sized> {
    terminal: &'t mut T,
    buffer: Zeroizing<String>,
    echo: Echo,
    poll_interval: Duration,
    reveal_timeout: Duration,
    interrupt_message: String,
}

impl<'t, T: Terminal + ?Sized> LineReader<'t, T> {
    fn new(terminal: &'t mut T, echo: Echo) -> Self {
        Self {
            terminal,
            buffer: Zeroizing::new(String::new()),
            echo,
            poll_interval: POLL_INTERVAL,
            reveal_timeout: REVEAL_TIMEOUT,
            interrupt_message: English.input_interrupted(),
        }
    }

    /// Reader echoing `*` in place of each character.
    pub fn masked(terminal: &'t mut T) -> Self {
        Self::new(terminal, Echo::Masked)
    }

    /// Reader echoing characters as typed.
    pub fn clear(terminal: &'t mut T) -> Self {
        Self::new(terminal, Echo::Clear)
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn reveal_timeout(mut self, timeout: Duration) -> Self {
        self.reveal_timeout = timeout;
        self
    }

    pub fn interrupt_message<S: Into<String>>(mut self, message: S) -> Self {
        self.interrupt_message = message.into();
        self
    }

    /// Read until Enter, or until Escape for masked input.
    pub fn read(mut self) -> Result<Zeroizing<String>> {
        loop {
            let Some(press) = self.terminal.poll_key(self.poll_interval)? else {
                if let Echo::Revealed { since } = self.echo {
                    if since.elapsed() >= self.reveal_timeout {
                        self.mask()?;
                    }
                }
                continue;
            };

            if matches!(self.echo, Echo::Revealed { .. }) {
                self.mask()?;
            }
            if press.is_interrupt() {
                self.terminal.write("\r\n")?;
                return Err(ArgbindError::interrupted(self.interrupt_message.clone()));
            }

            let masked = self.echo != Echo::Clear;
            match press.key {
                _ if press.ctrl || press.alt => {}
                Key::Tab | Key::F(2) if masked => self.reveal()?,
                Key::Enter => break,
                Key::Escape if masked => {
                    self.buffer.clear();
                    break;
                }
                Key::Backspace => self.erase()?,
                Key::Char(c) => {
                    self.buffer.push(c);
                    let echoed = if masked { MASK_CHAR } else { c };
                    let mut bytes = [0u8; 4];
                    self.terminal.write(echoed.encode_utf8(&mut bytes))?;
                }
                _ => {}
            }
        }

        self.terminal.write("\r\n")?;
        trace!("Line input accepted");
        Ok(self.buffer)
    }

    fn rewind(&mut self) -> Result<()> {
        let (column, row) = self.terminal.cursor()?;
        let width = self.terminal.width()?;
        let (column, row) = rewind_position(column, row, width, self.buffer.chars().count());
        self.terminal.move_to(column, row)
    }

    fn reveal(&mut self) -> Result<()> {
        self.rewind()?;
        self.terminal.write(&self.buffer)?;
        self.echo = Echo::Revealed { since: Instant::now() };
        Ok(())
    }

    fn mask(&mut self) -> Result<()> {
        self.rewind()?;
        let stars: Zeroizing<String> = Zeroizing::new(
            std::iter::repeat(MASK_CHAR)
                .take(self.buffer.chars().count())
                .collect(),
        );
        self.terminal.write(&stars)?;
        self.echo = Echo::Masked;
        Ok(())
    }

    /// Drop the last character and blank its cell, wrapping to the end of
    /// the previous row from the first column.
    fn erase(&mut self) -> Result<()> {
        if self.buffer.pop().is_none() {
            return Ok(());
        }
        self.terminal.set_cursor_visible(false)?;
        let (column, row) = self.terminal.cursor()?;
        let width = self.terminal.width()?;
        let (column, row) = rewind_position(column, row, width, 1);
        self.terminal.move_to(column, row)?;
        self.terminal.write(" ")?;
        self.terminal.move_to(column, row)?;
        self.terminal.set_cursor_visible(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::scripted::{chars, key, ScriptedTerminal};
    use crate::terminal::KeyPress;

    #[test]
    fn test_typed_characters_are_masked() {
        let mut keys = chars("pa55");
        keys.push(key(Key::Enter));
        let mut terminal = ScriptedTerminal::new(80, 2, keys);
        let secret = LineReader::masked(&mut terminal).read().unwrap();
        assert_eq!(secret.as_str(), "pa55");
        assert_eq!(terminal.row_text(0), "****");
    }

    #[test]
    fn test_backspace_wraps_to_previous_row() {
        let mut keys = chars("abcd");
        keys.push(key(Key::Backspace));
        keys.push(key(Key::Backspace));
        keys.push(key(Key::Enter));
        let mut terminal = ScriptedTerminal::new(4, 1, keys);
        let secret = LineReader::masked(&mut terminal).read().unwrap();
        assert_eq!(secret.as_str(), "ab");
        assert_eq!(terminal.row_text(0), "**");
        assert_eq!(terminal.row_text(1), "");
    }

    #[test]
    fn test_reveal_then_remask_on_next_key() {
        let mut keys = chars("ab");
        keys.push(key(Key::Tab));
        let mut terminal = ScriptedTerminal::new(80, 0, keys);
        let reader = LineReader::masked(&mut terminal);
        // Tab reveals; the trailing Enter from the script re-masks first.
        let secret = reader.read().unwrap();
        assert_eq!(secret.as_str(), "ab");
        assert_eq!(terminal.row_text(0), "**");
    }

    #[test]
    fn test_reveal_times_out() {
        let mut keys = chars("xy");
        keys.push(key(Key::F(2)));
        keys.push(None);
        keys.push(key(Key::Enter));
        let mut terminal = ScriptedTerminal::new(80, 0, keys);
        let secret = LineReader::masked(&mut terminal)
            .reveal_timeout(Duration::ZERO)
            .read()
            .unwrap();
        assert_eq!(secret.as_str(), "xy");
        assert_eq!(terminal.row_text(0), "**");
    }

    #[test]
    fn test_modified_reveal_keys_do_not_reveal() {
        let mut keys = chars("xy");
        keys.push(Some(KeyPress {
            key: Key::Tab,
            ctrl: true,
            alt: false,
        }));
        keys.push(Some(KeyPress {
            key: Key::F(2),
            ctrl: false,
            alt: true,
        }));
        keys.push(None);
        keys.push(key(Key::Escape));
        let mut terminal = ScriptedTerminal::new(80, 0, keys);
        let secret = LineReader::masked(&mut terminal)
            .reveal_timeout(Duration::from_secs(3600))
            .read()
            .unwrap();
        assert_eq!(secret.as_str(), "");
        assert_eq!(terminal.row_text(0), "**");
    }

    #[test]
    fn test_escape_clears() {
        let mut keys = chars("abc");
        keys.push(key(Key::Escape));
        let mut terminal = ScriptedTerminal::new(80, 0, keys);
        assert_eq!(LineReader::masked(&mut terminal).read().unwrap().as_str(), "");
    }

    #[test]
    fn test_modified_keys_are_ignored() {
        let mut keys = chars("a");
        keys.push(Some(KeyPress {
            key: Key::Char('b'),
            ctrl: false,
            alt: true,
        }));
        keys.push(Some(KeyPress::ctrl('v')));
        keys.push(key(Key::Enter));
        let mut terminal = ScriptedTerminal::new(80, 0, keys);
        assert_eq!(LineReader::masked(&mut terminal).read().unwrap().as_str(), "a");
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let mut keys = chars("a");
        keys.push(Some(KeyPress::ctrl('c')));
        let mut terminal = ScriptedTerminal::new(80, 0, keys);
        let err = LineReader::masked(&mut terminal).read().unwrap_err();
        assert!(err.is_interrupt());
        assert_eq!(err.to_string(), "Input has been interrupted by user");
    }

    #[test]
    fn test_clear_input_echoes_text() {
        let mut keys = chars("hosts");
        keys.push(key(Key::Backspace));
        keys.push(key(Key::Tab));
        keys.push(key(Key::Escape));
        keys.push(key(Key::Enter));
        let mut terminal = ScriptedTerminal::new(80, 2, keys);
        let line = LineReader::clear(&mut terminal).read().unwrap();
        assert_eq!(line.as_str(), "host");
        assert_eq!(terminal.row_text(0), "host");
    }

    #[test]
    fn test_clear_input_ctrl_c_interrupts() {
        let mut keys = chars("ab");
        keys.push(Some(KeyPress::ctrl('c')));
        let mut terminal = ScriptedTerminal::new(80, 0, keys);
        let err = LineReader::clear(&mut terminal)
            .interrupt_message("stopped")
            .read()
            .unwrap_err();
        assert!(err.is_interrupt());
        assert_eq!(err.to_string(), "stopped");
    }
}
