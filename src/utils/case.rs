//! Identifier case conversions used to derive argument and variable names.

use heck::{ToKebabCase, ToShoutySnakeCase, ToSnakeCase};

/// `user_name` / `UserName` -> `user-name`
pub fn to_kebab_case(name: &str) -> String {
    name.to_kebab_case()
}

/// `user_name` / `UserName` -> `USER_NAME`
pub fn to_screaming_snake_case(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Last word of an identifier, used as a value placeholder in usage lines.
pub fn last_word(name: &str) -> String {
    name.to_snake_case()
        .rsplit('_')
        .next()
        .unwrap_or_default()
        .to_string()
}
