//! Static metadata describing configuration objects and their values.

pub mod field;
pub mod schema;
pub mod value;

pub use field::{FieldSpec, Interactive, Pattern, Placement};
pub use schema::{Configurable, Schema};
pub use value::{EnumType, Scalar, ScalarType, Value, ValueType};
