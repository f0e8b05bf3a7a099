//! Persisted-settings and environment resolvers.
//!
//! Both run in one of two modes: strict, where the first failure aborts
//! the parse, or lenient, where failures are logged and the field keeps
//! the value it already had.

use tracing::{debug, warn};

use crate::config::{EnvSource, SettingsSource};
use crate::error::Result;
use crate::model::Value;
use crate::resolve::convert::{convert, escape_element};
use crate::resolve::descriptor::{Descriptor, FieldKinds};
use crate::resolve::validate::validate;
use crate::resolve::Scope;

/// Highest `<key>.<index>` probed for array settings.
pub const MAX_ARRAY_INDEX: usize = 100;

/// Substitutions allowed while expanding `[[key]]` references in one value.
pub const MAX_REFERENCE_EXPANSIONS: usize = 100;

/// Candidate keys for an argument, most specific first.
pub fn settings_keys(namespace: &str, command: Option<&str>, argument: &str) -> Vec<String> {
    match command {
        Some(command) => vec![
            format!("{}.{}.{}", namespace, command, argument),
            format!("{}.*.{}", namespace, argument),
        ],
        None => vec![format!("{}.{}", namespace, argument)],
    }
}

/// Read one key. Arrays combine the base key value with the escaped values
/// of `<key>.1`, `<key>.2`, ... up to the first missing index.
pub fn lookup_setting(store: &dyn SettingsSource, key: &str, is_array: bool) -> Option<String> {
    if !is_array {
        return store.get(key);
    }

    let mut found = false;
    let mut value = String::new();
    if let Some(base) = store.get(key) {
        value.push_str(&base);
        found = true;
    }
    for index in 1..=MAX_ARRAY_INDEX {
        let Some(item) = store.get(&format!("{}.{}", key, index)) else {
            break;
        };
        found = true;
        if !value.is_empty() {
            value.push(',');
        }
        value.push_str(&escape_element(&item));
    }
    found.then_some(value)
}

/// Replace `[[name]]` placeholders with the value stored under `name`,
/// repeating until none is left.
pub fn substitute_references(
    store: &dyn SettingsSource,
    key: &str,
    value: String,
    scope: &Scope<'_>,
) -> Result<String> {
    let mut text = value;
    let mut expansions = 0;

    while let Some((start, end)) = find_placeholder(&text) {
        if expansions == MAX_REFERENCE_EXPANSIONS {
            return Err(scope.error(scope.catalog.reference_too_deep(key, MAX_REFERENCE_EXPANSIONS)));
        }
        let name = &text[start + 2..end - 2];
        let replacement = store
            .get(name)
            .ok_or_else(|| scope.error(scope.catalog.missing_reference(name)))?;
        text.replace_range(start..end, &replacement);
        expansions += 1;
    }
    Ok(text)
}

/// Byte range of the first `[[...]]` placeholder.
fn find_placeholder(text: &str) -> Option<(usize, usize)> {
    let start = text.find("[[")?;
    let close = text[start + 2..].find("]]")?;
    Some((start, start + 2 + close + 2))
}

/// Fill pending values from persisted settings.
pub fn resolve_settings(
    descriptors: &mut [Descriptor<'_>],
    store: &dyn SettingsSource,
    namespace: &str,
    scope: &Scope<'_>,
    strict: bool,
) -> Result<()> {
    let eligible = FieldKinds::NAMED_OR_POSITIONAL | FieldKinds::PERSISTED | FieldKinds::INTERACTIVE;

    for descriptor in descriptors.iter_mut() {
        if !descriptor.kinds().intersects(eligible) {
            continue;
        }

        let argument = descriptor.argument_name();
        let is_array = descriptor.value_type().is_array();
        let found = settings_keys(namespace, scope.command, &argument)
            .into_iter()
            .find_map(|key| lookup_setting(store, &key, is_array).map(|raw| (key, raw)));
        let Some((key, raw)) = found else {
            continue;
        };
        debug!("Found setting {} for {}", key, descriptor.name());

        let result = substitute_references(store, &key, raw, scope)
            .and_then(|raw| parse_raw(&raw, descriptor, scope));
        match result {
            Ok(value) => descriptor.set_pending(value),
            Err(e) if strict => return Err(e),
            Err(e) => warn!("{}", scope.catalog.settings_parse_failed(&argument, &e.to_string())),
        }
    }
    Ok(())
}

/// Fill pending values from environment variables. Empty values count.
pub fn resolve_environment(
    descriptors: &mut [Descriptor<'_>],
    env: &dyn EnvSource,
    scope: &Scope<'_>,
    strict: bool,
) -> Result<()> {
    for descriptor in descriptors.iter_mut() {
        if !descriptor.is_environment() {
            continue;
        }

        let var = descriptor.env_var();
        let Some(raw) = env.var(&var) else {
            continue;
        };
        debug!("Found environment variable {} for {}", var, descriptor.name());

        match parse_raw(&raw, descriptor, scope) {
            Ok(value) => descriptor.set_pending(value),
            Err(e) => {
                let message = scope.catalog.env_parse_failed(&var, &e.to_string());
                if strict {
                    return Err(scope.caused(message, e));
                }
                warn!("{}", message);
            }
        }
    }
    Ok(())
}

/// Validate then convert a raw value for one descriptor.
pub fn parse_raw(raw: &str, descriptor: &Descriptor<'_>, scope: &Scope<'_>) -> Result<Value> {
    validate(raw, descriptor.spec(), scope)?;
    convert(raw, descriptor.value_type(), scope)
}
