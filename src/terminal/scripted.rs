//! In-memory terminal for tests.

use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use crate::error::Result;
use crate::terminal::{Key, KeyPress, Terminal};

/// Screen model with wrapping rows, fed from a key script where `None`
/// is an idle poll. An exhausted script presses Enter.
pub(crate) struct ScriptedTerminal {
    keys: VecDeque<Option<KeyPress>>,
    width: u16,
    column: u16,
    row: u16,
    screen: BTreeMap<(u16, u16), char>,
}

impl ScriptedTerminal {
    pub(crate) fn new(width: u16, column: u16, keys: Vec<Option<KeyPress>>) -> Self {
        Self {
            keys: keys.into(),
            width,
            column,
            row: 0,
            screen: BTreeMap::new(),
        }
    }

    pub(crate) fn row_text(&self, row: u16) -> String {
        self.screen
            .range((row, 0)..(row + 1, 0))
            .map(|(_, c)| *c)
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

impl Terminal for ScriptedTerminal {
    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<KeyPress>> {
        Ok(self.keys.pop_front().unwrap_or(Some(KeyPress::plain(Key::Enter))))
    }

    fn cursor(&mut self) -> Result<(u16, u16)> {
        Ok((self.column, self.row))
    }

    fn width(&mut self) -> Result<u16> {
        Ok(self.width)
    }

    fn move_to(&mut self, column: u16, row: u16) -> Result<()> {
        self.column = column;
        self.row = row;
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            match c {
                '\r' => self.column = 0,
                '\n' => self.row += 1,
                _ => {
                    self.screen.insert((self.row, self.column), c);
                    self.column += 1;
                    if self.column == self.width {
                        self.column = 0;
                        self.row += 1;
                    }
                }
            }
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, _visible: bool) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn chars(text: &str) -> Vec<Option<KeyPress>> {
    text.chars().map(|c| Some(KeyPress::plain(Key::Char(c)))).collect()
}

pub(crate) fn key(key: Key) -> Option<KeyPress> {
    Some(KeyPress::plain(key))
}
