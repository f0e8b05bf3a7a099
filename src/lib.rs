//! argbind - declarative command-line argument binding
//!
//! Binds typed configuration objects from persisted settings, environment
//! variables, command-line tokens and interactive prompts, and generates
//! usage text, settings templates and argument dumps from the same field
//! declarations.

pub mod cli;
pub mod config;
pub mod error;
pub mod help;
pub mod locale;
pub mod model;
pub mod resolve;
pub mod terminal;
pub mod utils;

// Re-export commonly used types
pub use cli::{Cli, Outcome, Target};
pub use config::{EnvSource, ProcessEnv, Settings, SettingsSource};
pub use error::{ArgbindError, Result};
pub use help::{ArgsView, HelpDetail};
pub use locale::{Catalog, English};
pub use model::{Configurable, EnumType, FieldSpec, Scalar, ScalarType, Schema, Value, ValueType};
pub use resolve::FieldKinds;
pub use terminal::{Console, StdConsole, TerminalConsole};
