//! Raw string to typed value conversion, including the array grammar.
//!
//! Array values are comma separated. A backslash makes the next character
//! literal, so `a,b\,c` holds the two elements `a` and `b,c`.

use crate::error::{ArgbindError, Result};
use crate::model::{Scalar, ScalarType, Value, ValueType};
use crate::resolve::Scope;
use crate::utils::datetime::parse_local_datetime;

/// Split a raw value into its elements.
///
/// The final element is dropped only when it is empty and nothing precedes
/// it, so `""` has no elements while `"a,"` has two.
pub fn split_elements(raw: &str) -> Vec<String> {
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ',' => elements.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if !current.is_empty() || !elements.is_empty() {
        elements.push(current);
    }
    elements
}

pub fn escape_element(element: &str) -> String {
    element.replace('\\', "\\\\").replace(',', "\\,")
}

/// Inverse of [`split_elements`].
pub fn join_elements<S: AsRef<str>>(elements: &[S]) -> String {
    elements
        .iter()
        .map(|e| escape_element(e.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Convert a raw value to the declared type of a field.
pub fn convert(raw: &str, value_type: ValueType, scope: &Scope<'_>) -> Result<Value> {
    match value_type {
        ValueType::Scalar(t) => convert_scalar(raw, t, scope).map(Value::Scalar),
        ValueType::Array(t) => convert_elements(&split_elements(raw), t, scope),
    }
}

/// Convert already split elements into an array value.
pub fn convert_elements<S: AsRef<str>>(elements: &[S], element_type: ScalarType, scope: &Scope<'_>) -> Result<Value> {
    let mut items = Vec::with_capacity(elements.len());
    for (i, element) in elements.iter().enumerate() {
        let element = element.as_ref();
        let item = convert_scalar(element, element_type, scope).map_err(|e| {
            scope.caused(
                scope
                    .catalog
                    .cannot_convert_element(i + 1, element, element_type.name()),
                e,
            )
        })?;
        items.push(item);
    }
    Ok(Value::Array(items))
}

pub fn convert_scalar(raw: &str, scalar_type: ScalarType, scope: &Scope<'_>) -> Result<Scalar> {
    parse_scalar(raw, scalar_type, scope)
        .map_err(|e| scope.caused(scope.catalog.cannot_convert(raw, scalar_type.name()), e))
}

fn parse_scalar(raw: &str, scalar_type: ScalarType, scope: &Scope<'_>) -> Result<Scalar> {
    let trimmed = raw.trim();
    match scalar_type {
        ScalarType::String => Ok(Scalar::String(raw.to_string())),
        ScalarType::Enum(e) => e
            .lookup(trimmed)
            .map(|variant| Scalar::Enum(variant.to_string()))
            .ok_or_else(|| {
                ArgbindError::invalid_value(format!(
                    "\"{}\" is not one of {}",
                    trimmed,
                    e.variants.join(",")
                ))
            }),
        ScalarType::Integer => trimmed
            .parse::<i64>()
            .map(Scalar::Integer)
            .map_err(|e| ArgbindError::invalid_value(e.to_string())),
        ScalarType::Float => trimmed
            .parse::<f64>()
            .map(Scalar::Float)
            .map_err(|e| ArgbindError::invalid_value(e.to_string())),
        ScalarType::Boolean => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Scalar::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Scalar::Boolean(false))
            } else {
                Err(ArgbindError::invalid_value(format!(
                    "\"{}\" is neither true nor false",
                    trimmed
                )))
            }
        }
        ScalarType::DateTime => parse_local_datetime(
            raw,
            scope.catalog.datetime_formats(),
            scope.catalog.date_formats(),
        )
        .map(Scalar::DateTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::English;
    use crate::model::EnumType;

    const LEVEL: EnumType = EnumType::new("Level", &["Low", "High"]);

    fn scope() -> Scope<'static> {
        Scope::new(&English, Some("run"))
    }

    #[test]
    fn test_split_with_escapes() {
        assert_eq!(split_elements(r"a,b\,c"), ["a", "b,c"]);
        assert_eq!(split_elements(r"a\\,b"), [r"a\", "b"]);
        assert_eq!(split_elements(""), Vec::<String>::new());
        assert_eq!(split_elements("a,"), ["a", ""]);
        assert_eq!(split_elements(",a"), ["", "a"]);
        assert_eq!(split_elements("trail\\"), ["trail"]);
    }

    #[test]
    fn test_join_then_split_recovers_elements() {
        let cases: Vec<Vec<&str>> = vec![
            vec!["plain"],
            vec!["with,comma", r"back\slash", ""],
            vec![r"\,", "x", ",,"],
        ];
        for elements in cases {
            let joined = join_elements(&elements);
            assert_eq!(split_elements(&joined), elements, "joined: {}", joined);
        }
    }

    #[test]
    fn test_convert_scalars() {
        let scope = scope();
        assert_eq!(
            convert(" 42 ", ValueType::INTEGER, &scope).unwrap(),
            Value::Scalar(Scalar::Integer(42))
        );
        assert_eq!(
            convert("TRUE", ValueType::BOOLEAN, &scope).unwrap(),
            Value::Scalar(Scalar::Boolean(true))
        );
        assert_eq!(
            convert(" high", ValueType::enumeration(LEVEL), &scope).unwrap(),
            Value::enumeration("High")
        );
        assert_eq!(convert(" keep ", ValueType::STRING, &scope).unwrap(), Value::from(" keep "));
    }

    #[test]
    fn test_convert_failure_message() {
        let err = convert("abc", ValueType::INTEGER, &scope()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not cast string \"abc\" to the target type \"integer\""
        );
        assert_eq!(err.command(), Some("run"));
    }

    #[test]
    fn test_convert_array_reports_element() {
        let err = convert("1,x,3", ValueType::INTEGERS, &scope()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not cast element number \"2\" with value = \"x\" to the target type \"integer\""
        );
        let inner = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(
            inner.as_deref(),
            Some("Could not cast string \"x\" to the target type \"integer\"")
        );
    }

    #[test]
    fn test_convert_string_array() {
        let value = convert(r"a,b\,c", ValueType::STRINGS, &scope()).unwrap();
        assert_eq!(value, Value::from(vec!["a".to_string(), "b,c".to_string()]));
    }
}
