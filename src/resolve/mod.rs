//! Field resolution pipeline
//!
//! Descriptors are extracted from a schema, filled from settings, the
//! environment and command-line tokens in that order, validated and
//! converted inline, then committed into the configuration object.

pub mod commit;
pub mod convert;
pub mod descriptor;
pub mod sources;
pub mod validate;
pub mod walker;

pub use commit::commit;
pub use convert::{convert, escape_element, join_elements, split_elements};
pub use descriptor::{extract, Descriptor, FieldKinds};
pub use validate::validate;

use crate::error::ArgbindError;
use crate::locale::Catalog;

/// Text catalog plus the command owning the fields being resolved,
/// used to build parse errors.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub catalog: &'a dyn Catalog,
    pub command: Option<&'a str>,
}

impl<'a> Scope<'a> {
    pub fn new(catalog: &'a dyn Catalog, command: Option<&'a str>) -> Self {
        Self { catalog, command }
    }

    pub fn error<S: Into<String>>(&self, message: S) -> ArgbindError {
        ArgbindError::parse(message, self.command)
    }

    pub fn caused<S: Into<String>>(&self, message: S, cause: ArgbindError) -> ArgbindError {
        ArgbindError::parse_caused(message, self.command, cause)
    }
}
