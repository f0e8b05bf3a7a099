//! Text forms of field values for help, samples and settings output.
//!
//! Secret fields never show their content: `***` for scalars, `***,***` for
//! arrays and `"***" "***"` for rest-of-arguments fields.

use crate::model::{FieldSpec, Value};
use crate::resolve::convert::{join_elements, split_elements};

const MASK: &str = "***";

fn masked(is_array: bool, rest: bool) -> String {
    match (is_array, rest) {
        (false, _) => MASK.to_string(),
        (true, true) => format!("\"{}\" \"{}\"", MASK, MASK),
        (true, false) => format!("{},{}", MASK, MASK),
    }
}

fn quoted(elements: &[String]) -> String {
    elements
        .iter()
        .map(|e| format!("\"{}\"", e))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Current value of a field. Unset values render as `null`, arrays in their
/// comma-escaped form or as quoted tokens for rest-of-arguments fields.
pub fn render_value(value: Option<&Value>, spec: &FieldSpec) -> String {
    if spec.secret {
        return masked(spec.value_type.is_array(), spec.is_rest());
    }
    match value {
        None => "null".to_string(),
        Some(Value::Scalar(scalar)) => scalar.to_string(),
        Some(Value::Array(items)) => {
            let elements: Vec<String> = items.iter().map(|i| i.to_string()).collect();
            if spec.is_rest() {
                quoted(&elements)
            } else {
                join_elements(&elements)
            }
        }
    }
}

/// Value as written into a settings file: arrays always use the
/// comma-escaped form so the template reads back unchanged.
pub fn render_setting(value: Option<&Value>, spec: &FieldSpec) -> String {
    if spec.secret {
        return masked(spec.value_type.is_array(), false);
    }
    match value {
        Some(Value::Array(items)) => {
            let elements: Vec<String> = items.iter().map(|i| i.to_string()).collect();
            join_elements(&elements)
        }
        Some(Value::Scalar(scalar)) => scalar.to_string(),
        None => String::new(),
    }
}

/// Declared sample value, or `None` when the field has none.
pub fn render_sample(spec: &FieldSpec) -> Option<String> {
    let sample = spec.sample.as_ref()?;
    if spec.secret {
        return Some(masked(spec.value_type.is_array(), spec.is_rest()));
    }
    if spec.is_rest() {
        return Some(quoted(&split_elements(sample)));
    }
    Some(sample.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;

    #[test]
    fn test_plain_values() {
        let spec = FieldSpec::named("tasks", ValueType::INTEGER);
        assert_eq!(render_value(Some(&Value::from(8i64)), &spec), "8");
        assert_eq!(render_value(None, &spec), "null");

        let hosts = FieldSpec::named("hosts", ValueType::STRINGS);
        let value = Value::from(vec!["a".to_string(), "b,c".to_string()]);
        assert_eq!(render_value(Some(&value), &hosts), r"a,b\,c");
    }

    #[test]
    fn test_rest_values_are_quoted() {
        let spec = FieldSpec::positional("files", ValueType::STRINGS).rest_of_arguments();
        let value = Value::from(vec!["a b".to_string(), "c".to_string()]);
        assert_eq!(render_value(Some(&value), &spec), "\"a b\" \"c\"");
        assert_eq!(render_sample(&spec.clone().sample("x,y")), Some("\"x\" \"y\"".to_string()));
        assert_eq!(render_setting(Some(&value), &spec), "a b,c");
        assert_eq!(render_setting(None, &spec), "");
    }

    #[test]
    fn test_secrets_are_masked() {
        let spec = FieldSpec::named("password", ValueType::STRING).secret().sample("topsecret");
        assert_eq!(render_value(Some(&Value::from("topsecret")), &spec), "***");
        assert_eq!(render_value(None, &spec), "***");
        assert_eq!(render_sample(&spec), Some("***".to_string()));

        let keys = FieldSpec::named("keys", ValueType::STRINGS).secret();
        assert_eq!(render_value(Some(&Value::from(vec!["k".to_string()])), &keys), "***,***");

        let rest = FieldSpec::positional("keys", ValueType::STRINGS).rest_of_arguments().secret();
        assert_eq!(render_value(None, &rest), "\"***\" \"***\"");
    }
}
