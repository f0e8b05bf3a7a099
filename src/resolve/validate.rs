//! Range and pattern checks applied to raw values before conversion.

use regex::{Regex, RegexBuilder};

use crate::error::Result;
use crate::model::FieldSpec;
use crate::resolve::convert::split_elements;
use crate::resolve::Scope;

/// Validate a raw value. Array values are split and checked element-wise.
pub fn validate(raw: &str, spec: &FieldSpec, scope: &Scope<'_>) -> Result<()> {
    if spec.value_type.is_array() {
        validate_elements(&split_elements(raw), spec, scope)
    } else {
        if spec.range.is_none() && spec.pattern.is_none() {
            return Ok(());
        }
        let regex = compile(spec, scope)?;
        check(raw, None, spec, regex.as_ref(), scope)
    }
}

/// Validate already split array elements; errors name the 1-based element.
pub fn validate_elements<S: AsRef<str>>(elements: &[S], spec: &FieldSpec, scope: &Scope<'_>) -> Result<()> {
    if spec.range.is_none() && spec.pattern.is_none() {
        return Ok(());
    }
    let regex = compile(spec, scope)?;
    for (i, element) in elements.iter().enumerate() {
        check(element.as_ref(), Some(i + 1), spec, regex.as_ref(), scope)?;
    }
    Ok(())
}

fn compile(spec: &FieldSpec, scope: &Scope<'_>) -> Result<Option<Regex>> {
    let Some(pattern) = &spec.pattern else {
        return Ok(None);
    };
    RegexBuilder::new(&pattern.regex)
        .case_insensitive(pattern.ignore_case)
        .build()
        .map(Some)
        .map_err(|e| {
            scope.caused(
                scope.catalog.invalid_pattern(&spec.argument_name(), &pattern.regex),
                e.into(),
            )
        })
}

fn check(
    value: &str,
    element: Option<usize>,
    spec: &FieldSpec,
    regex: Option<&Regex>,
    scope: &Scope<'_>,
) -> Result<()> {
    let catalog = scope.catalog;
    let argument = spec.argument_name();

    if let Some((min, max)) = spec.range {
        let number = value.trim().parse::<i64>().map_err(|_| {
            scope.error(match element {
                Some(i) => catalog.element_range_not_integer(&argument, i, value),
                None => catalog.range_not_integer(value),
            })
        })?;
        if number < min || number > max {
            return Err(scope.error(match element {
                Some(i) => catalog.element_out_of_range(&argument, number, i, min, max),
                None => catalog.out_of_range(number, &argument, min, max),
            }));
        }
    }

    if let (Some(regex), Some(pattern)) = (regex, &spec.pattern) {
        if !regex.is_match(value) {
            return Err(scope.error(match element {
                Some(i) => catalog.element_pattern_mismatch(&argument, value, i, &pattern.regex),
                None => catalog.pattern_mismatch(value, &argument, &pattern.regex),
            }));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgbindError;
    use crate::locale::English;
    use crate::model::ValueType;

    fn scope() -> Scope<'static> {
        Scope::new(&English, None)
    }

    #[test]
    fn test_range_is_inclusive() {
        let spec = FieldSpec::named("tasks", ValueType::INTEGER).range(1, 128);
        let scope = scope();
        assert!(validate("1", &spec, &scope).is_ok());
        assert!(validate("128", &spec, &scope).is_ok());
        assert!(validate(" 64 ", &spec, &scope).is_ok());
        assert!(validate("0", &spec, &scope).is_err());
        let err = validate("129", &spec, &scope).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The value 129 of argument \"tasks\" must be in range between 1 and 128 "
        );
    }

    #[test]
    fn test_range_rejects_non_integers() {
        let spec = FieldSpec::named("tasks", ValueType::INTEGER).min(0);
        let err = validate("many", &spec, &scope()).unwrap_err();
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("\"many\""));
    }

    #[test]
    fn test_pattern() {
        let spec = FieldSpec::named("code", ValueType::STRING).pattern("^[a-z]+$");
        assert!(validate("abc", &spec, &scope()).is_ok());
        assert!(validate("ABC", &spec, &scope()).is_err());

        let relaxed = FieldSpec::named("code", ValueType::STRING).pattern_ignore_case("^[a-z]+$");
        assert!(validate("ABC", &relaxed, &scope()).is_ok());
    }

    #[test]
    fn test_invalid_pattern_is_distinct() {
        let spec = FieldSpec::named("code", ValueType::STRING).pattern("([a-z");
        let err = validate("abc", &spec, &scope()).unwrap_err();
        assert!(err.to_string().contains("could not be compiled"));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<ArgbindError>().is_some());
    }

    #[test]
    fn test_array_reports_failing_element() {
        let spec = FieldSpec::named("hosts", ValueType::STRINGS).pattern("^h[0-9]$");
        let err = validate("h1,h2,x3,h4", &spec, &scope()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The argument \"hosts\" validation error, value \"x3\" of array element number 3 does not match the regex pattern \"^h[0-9]$\" "
        );
    }

    #[test]
    fn test_array_range_per_element() {
        let spec = FieldSpec::positional("ports", ValueType::INTEGERS).range(1, 10);
        assert!(validate("1,10", &spec, &scope()).is_ok());
        let err = validate("1,11", &spec, &scope()).unwrap_err();
        assert!(err.to_string().contains("array element number 2"));
    }
}
