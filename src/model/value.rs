//! Declared field types and the typed values bound into configuration objects.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::error::{ArgbindError, Result};

/// Enumeration type described by its name and its variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumType {
    pub name: &'static str,
    pub variants: &'static [&'static str],
}

impl EnumType {
    pub const fn new(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self { name, variants }
    }

    /// Case-insensitive variant lookup returning the canonical variant name.
    pub fn lookup(&self, text: &str) -> Option<&'static str> {
        self.variants
            .iter()
            .copied()
            .find(|variant| variant.eq_ignore_ascii_case(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
    Enum(EnumType),
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::DateTime => "datetime",
            Self::Enum(e) => e.name,
        }
    }
}

/// Declared type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Scalar(ScalarType),
    Array(ScalarType),
}

impl ValueType {
    pub const STRING: ValueType = ValueType::Scalar(ScalarType::String);
    pub const INTEGER: ValueType = ValueType::Scalar(ScalarType::Integer);
    pub const FLOAT: ValueType = ValueType::Scalar(ScalarType::Float);
    pub const BOOLEAN: ValueType = ValueType::Scalar(ScalarType::Boolean);
    pub const DATETIME: ValueType = ValueType::Scalar(ScalarType::DateTime);
    pub const STRINGS: ValueType = ValueType::Array(ScalarType::String);
    pub const INTEGERS: ValueType = ValueType::Array(ScalarType::Integer);

    pub const fn enumeration(e: EnumType) -> Self {
        ValueType::Scalar(ScalarType::Enum(e))
    }

    pub const fn enumerations(e: EnumType) -> Self {
        ValueType::Array(ScalarType::Enum(e))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Scalar(ScalarType::Boolean))
    }

    /// Scalar type, or the element type for arrays.
    pub fn element(&self) -> ScalarType {
        match self {
            Self::Scalar(t) | Self::Array(t) => *t,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(t) => write!(f, "{}", t.name()),
            Self::Array(t) => write!(f, "{}[]", t.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<FixedOffset>),
    /// Canonical variant name.
    Enum(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Enum(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

/// A typed value, either committed into a configuration object or pending.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Array(Vec<Scalar>),
}

impl Value {
    /// Build an enum value from anything displaying as its variant name.
    pub fn enumeration<T: fmt::Display>(variant: T) -> Self {
        Value::Scalar(Scalar::Enum(variant.to_string()))
    }

    pub fn enumerations<T: fmt::Display>(variants: &[T]) -> Self {
        Value::Array(variants.iter().map(|v| Scalar::Enum(v.to_string())).collect())
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Scalars carried by this value; a scalar value yields one element.
    pub fn elements(&self) -> &[Scalar] {
        match self {
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::Array(items) => items,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Array(_) => None,
        }
    }

    /// Parse an enum value back into the caller's enum type.
    pub fn parse_enum<T: FromStr>(&self) -> Result<T> {
        match self.as_scalar() {
            Some(Scalar::Enum(name)) | Some(Scalar::String(name)) => name
                .parse::<T>()
                .map_err(|_| ArgbindError::invalid_value(format!("Unknown variant \"{}\"", name))),
            _ => Err(mismatch("enum", self)),
        }
    }

    pub fn parse_enums<T: FromStr>(&self) -> Result<Vec<T>> {
        self.elements()
            .iter()
            .map(|item| Value::Scalar(item.clone()).parse_enum())
            .collect()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "{}", s),
            Self::Array(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

fn mismatch(expected: &str, value: &Value) -> ArgbindError {
    ArgbindError::invalid_value(format!("Expected {} value but found \"{}\"", expected, value))
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Boolean(b))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(Scalar::Float(x))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::Scalar(Scalar::DateTime(dt))
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::Array(items.into_iter().map(Scalar::String).collect())
    }
}

impl From<Vec<i64>> for Value {
    fn from(items: Vec<i64>) -> Self {
        Value::Array(items.into_iter().map(Scalar::Integer).collect())
    }
}

macro_rules! integer_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Scalar(Scalar::Integer(i64::from(i)))
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! integer_field {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Value> for $t {
                type Error = ArgbindError;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::Scalar(Scalar::Integer(i)) => <$t>::try_from(i).map_err(|_| {
                            ArgbindError::invalid_value(format!(
                                "Value {} does not fit into {}",
                                i,
                                stringify!($t)
                            ))
                        }),
                        other => Err(mismatch("integer", &other)),
                    }
                }
            }
        )*
    };
}

integer_field!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl TryFrom<Value> for String {
    type Error = ArgbindError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Scalar(Scalar::String(s)) | Value::Scalar(Scalar::Enum(s)) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ArgbindError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Scalar(Scalar::Boolean(b)) => Ok(b),
            other => Err(mismatch("boolean", &other)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ArgbindError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Scalar(Scalar::Float(x)) => Ok(x),
            Value::Scalar(Scalar::Integer(i)) => Ok(i as f64),
            other => Err(mismatch("float", &other)),
        }
    }
}

impl TryFrom<Value> for DateTime<FixedOffset> {
    type Error = ArgbindError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Scalar(Scalar::DateTime(dt)) => Ok(dt),
            other => Err(mismatch("datetime", &other)),
        }
    }
}

impl TryFrom<Value> for Vec<String> {
    type Error = ArgbindError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| String::try_from(Value::Scalar(item)))
                .collect(),
            other => Err(mismatch("array", &other)),
        }
    }
}

impl TryFrom<Value> for Vec<i64> {
    type Error = ArgbindError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(|item| i64::try_from(Value::Scalar(item)))
                .collect(),
            other => Err(mismatch("array", &other)),
        }
    }
}
