//! Command-line token walker.

use tracing::debug;

use crate::error::Result;
use crate::model::Value;
use crate::resolve::convert::convert_elements;
use crate::resolve::descriptor::{find_by_long, find_by_position, find_by_short, Descriptor};
use crate::resolve::sources::parse_raw;
use crate::resolve::validate::validate_elements;
use crate::resolve::Scope;

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Short(char),
    Long(&'a str),
    Malformed,
    Positional,
}

/// `-x` with an alphanumeric `x` is a short name, `--name` a long name.
/// Any other token starting with `-` (`-`, `--`, `-ab`, `-12`) is malformed.
fn classify(token: &str) -> Token<'_> {
    let mut chars = token.chars();
    if let (Some('-'), Some(c), None) = (chars.next(), chars.next(), chars.next()) {
        if c.is_alphanumeric() {
            return Token::Short(c);
        }
    }
    if token.len() > 2 && token.starts_with("--") {
        return Token::Long(&token[2..]);
    }
    if token.starts_with('-') {
        return Token::Malformed;
    }
    Token::Positional
}

/// Assign pending values from command-line tokens, then check that every
/// required descriptor received one during this walk.
pub fn walk<S: AsRef<str>>(args: &[S], descriptors: &mut [Descriptor<'_>], scope: &Scope<'_>) -> Result<()> {
    let catalog = scope.catalog;
    let mut position = 0;
    let mut index = 0;

    while index < args.len() {
        let token = args[index].as_ref();

        let descriptor = match classify(token) {
            Token::Short(c) => {
                find_by_short(descriptors, c).ok_or_else(|| scope.error(catalog.unknown_short_name(c)))?
            }
            Token::Long(name) => {
                find_by_long(descriptors, name).ok_or_else(|| scope.error(catalog.unknown_long_name(name)))?
            }
            Token::Malformed => {
                return Err(scope.error(catalog.malformed_token(token, index + 1)));
            }
            Token::Positional => {
                position += 1;
                find_by_position(descriptors, position - 1)
                    .ok_or_else(|| scope.error(catalog.unknown_position(position)))?
            }
        };

        if descriptor.is_flag() {
            debug!("Flag {} set", descriptor.name());
            descriptor.set_pending(Value::from(true));
            index += 1;
            continue;
        }

        if descriptor.is_rest() {
            let rest = &args[index..];
            validate_elements(rest, descriptor.spec(), scope)?;
            let value = convert_elements(rest, descriptor.value_type().element(), scope)?;
            debug!("{} takes the remaining {} tokens", descriptor.name(), rest.len());
            descriptor.set_pending(value);
            break;
        }

        let raw = if descriptor.is_named() {
            index += 1;
            args.get(index)
                .map(|s| s.as_ref())
                .ok_or_else(|| scope.error(catalog.missing_option_value(token)))?
        } else {
            token
        };
        let value = parse_raw(raw, descriptor, scope)?;
        descriptor.set_pending(value);
        index += 1;
    }

    for descriptor in descriptors.iter() {
        if descriptor.is_required() && descriptor.pending().is_none() {
            let argument = descriptor.argument_name();
            let message = match descriptor.position() {
                Some(p) => catalog.must_be_provided_at(&argument, p + 1),
                None => catalog.must_be_provided(&argument),
            };
            return Err(scope.error(message));
        }
    }
    Ok(())
}
