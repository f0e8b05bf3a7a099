//! Line-oriented console used by interactive prompts.

use std::io::{self, BufRead, IsTerminal, Write};

use zeroize::Zeroizing;

use crate::error::{ArgbindError, Result};
use crate::locale::{Catalog, English};
use crate::terminal::{CrosstermTerminal, LineReader, RawModeGuard, Terminal};

pub trait Console {
    fn write(&mut self, text: &str) -> Result<()>;
    /// One line without its line terminator. End of input is an interrupt.
    fn read_line(&mut self) -> Result<String>;
    /// One line read without echoing its characters.
    fn read_secret(&mut self) -> Result<Zeroizing<String>>;
}

/// Console over a raw-mode terminal. Every read goes key by key through a
/// [`LineReader`], so Ctrl-C is seen as a key and reported as an interrupt.
pub struct TerminalConsole<T: Terminal> {
    terminal: T,
    interrupt_message: String,
}

impl<T: Terminal> TerminalConsole<T> {
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            interrupt_message: English.input_interrupted(),
        }
    }

    pub fn interrupt_message<S: Into<String>>(mut self, message: S) -> Self {
        self.interrupt_message = message.into();
        self
    }
}

impl<T: Terminal> Console for TerminalConsole<T> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.terminal.write(&text.replace('\n', "\r\n"))
    }

    fn read_line(&mut self) -> Result<String> {
        let line = LineReader::clear(&mut self.terminal)
            .interrupt_message(self.interrupt_message.clone())
            .read()?;
        Ok(line.as_str().to_string())
    }

    fn read_secret(&mut self) -> Result<Zeroizing<String>> {
        LineReader::masked(&mut self.terminal)
            .interrupt_message(self.interrupt_message.clone())
            .read()
    }
}

/// Console over the process stdin/stdout. Reads switch to raw mode when
/// stdin is a terminal and fall back to buffered lines otherwise.
pub struct StdConsole {
    interrupt_message: String,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            interrupt_message: English.input_interrupted(),
        }
    }

    pub fn with_catalog(catalog: &dyn Catalog) -> Self {
        Self {
            interrupt_message: catalog.input_interrupted(),
        }
    }

    fn terminal(&self) -> TerminalConsole<CrosstermTerminal> {
        TerminalConsole::new(CrosstermTerminal::new()).interrupt_message(self.interrupt_message.clone())
    }

    fn read_buffered_line(&mut self) -> Result<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => Err(ArgbindError::interrupted(self.interrupt_message.clone())),
            Ok(_) => {
                trim_line_end(&mut line);
                Ok(line)
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                Err(ArgbindError::interrupted(self.interrupt_message.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn trim_line_end(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

impl Console for StdConsole {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        if !io::stdin().is_terminal() {
            return self.read_buffered_line();
        }
        let _raw = RawModeGuard::enable()?;
        self.terminal().read_line()
    }

    fn read_secret(&mut self) -> Result<Zeroizing<String>> {
        if !io::stdin().is_terminal() {
            return self.read_buffered_line().map(Zeroizing::new);
        }
        let _raw = RawModeGuard::enable()?;
        self.terminal().read_secret()
    }
}
