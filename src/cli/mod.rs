//! Command-line entry points
//!
//! [`Cli`] ties the settings store, the environment and the text catalog
//! together, binds configuration objects, runs interactive prompts and
//! renders help.

pub mod engine;
pub mod interactive;

pub use engine::{Cli, Outcome, Target};
