//! Configuration sources module
//!
//! Persisted key/value settings and process environment lookup, the two
//! automated sources consulted before command-line tokens.

pub mod env;
pub mod settings;

pub use env::*;
pub use settings::*;
