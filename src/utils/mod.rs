//! Utility functions module
//!
//! Identifier case conversions, date/time parsing, XML escaping and bitmask
//! helpers.

pub mod case;
pub mod datetime;
pub(crate) mod mask;
pub mod xml;

pub use case::*;
pub use datetime::*;
pub use xml::*;
