//! Static per-field metadata and its builder.

use crate::model::value::ValueType;
use crate::utils::case::{last_word, to_kebab_case, to_screaming_snake_case};

/// Where a field can appear on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Not bindable from command-line tokens.
    Unplaced,
    Named {
        short: Option<char>,
        long: Option<String>,
    },
    Positional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interactive {
    pub label: String,
    pub default_on_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub regex: String,
    pub ignore_case: bool,
}

/// Declarative description of one configuration field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub value_type: ValueType,
    pub placement: Placement,
    pub persisted: bool,
    pub interactive: Option<Interactive>,
    pub environment: bool,
    pub env_var: Option<String>,
    pub required: bool,
    pub rest_of_arguments: bool,
    pub secret: bool,
    pub sample: Option<String>,
    pub range: Option<(i64, i64)>,
    pub pattern: Option<Pattern>,
    pub doc: Option<String>,
}

impl FieldSpec {
    /// Field reachable only through settings, environment or prompts.
    pub fn new<S: Into<String>>(name: S, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            placement: Placement::Unplaced,
            persisted: false,
            interactive: None,
            environment: false,
            env_var: None,
            required: false,
            rest_of_arguments: false,
            secret: false,
            sample: None,
            range: None,
            pattern: None,
            doc: None,
        }
    }

    pub fn named<S: Into<String>>(name: S, value_type: ValueType) -> Self {
        let mut spec = Self::new(name, value_type);
        spec.placement = Placement::Named {
            short: None,
            long: None,
        };
        spec
    }

    pub fn positional<S: Into<String>>(name: S, value_type: ValueType) -> Self {
        let mut spec = Self::new(name, value_type);
        spec.placement = Placement::Positional;
        spec
    }

    /// Short alias; turns an unplaced field into a named one.
    pub fn short(mut self, c: char) -> Self {
        self.placement = match self.placement {
            Placement::Named { long, .. } => Placement::Named { short: Some(c), long },
            _ => Placement::Named {
                short: Some(c),
                long: None,
            },
        };
        self
    }

    /// Explicit long name instead of the kebab-case form of the field name.
    pub fn long<S: Into<String>>(mut self, long: S) -> Self {
        self.placement = match self.placement {
            Placement::Named { short, .. } => Placement::Named {
                short,
                long: Some(long.into()),
            },
            _ => Placement::Named {
                short: None,
                long: Some(long.into()),
            },
        };
        self
    }

    pub fn persisted(mut self) -> Self {
        self.persisted = true;
        self
    }

    pub fn interactive<S: Into<String>>(mut self, label: S, default_on_empty: bool) -> Self {
        self.interactive = Some(Interactive {
            label: label.into(),
            default_on_empty,
        });
        self
    }

    /// Bind from the environment under the derived variable name.
    pub fn env(mut self) -> Self {
        self.environment = true;
        self
    }

    pub fn env_var<S: Into<String>>(mut self, var: S) -> Self {
        self.environment = true;
        self.env_var = Some(var.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn rest_of_arguments(mut self) -> Self {
        self.rest_of_arguments = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn sample<S: Into<String>>(mut self, sample: S) -> Self {
        self.sample = Some(sample.into());
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Lower bound only.
    pub fn min(self, min: i64) -> Self {
        self.range(min, i64::MAX)
    }

    pub fn pattern<S: Into<String>>(mut self, regex: S) -> Self {
        self.pattern = Some(Pattern {
            regex: regex.into(),
            ignore_case: false,
        });
        self
    }

    pub fn pattern_ignore_case<S: Into<String>>(mut self, regex: S) -> Self {
        self.pattern = Some(Pattern {
            regex: regex.into(),
            ignore_case: true,
        });
        self
    }

    pub fn doc<S: Into<String>>(mut self, doc: S) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn is_named(&self) -> bool {
        matches!(self.placement, Placement::Named { .. })
    }

    pub fn is_positional(&self) -> bool {
        self.placement == Placement::Positional
    }

    pub fn is_flag(&self) -> bool {
        self.is_named() && self.value_type.is_boolean()
    }

    /// Rest-of-arguments only takes effect on array-typed positional fields.
    pub fn is_rest(&self) -> bool {
        self.rest_of_arguments && self.is_positional() && self.value_type.is_array()
    }

    pub fn short_name(&self) -> Option<char> {
        match &self.placement {
            Placement::Named { short, .. } => *short,
            _ => None,
        }
    }

    pub fn long_name(&self) -> String {
        match &self.placement {
            Placement::Named { long: Some(long), .. } => long.clone(),
            _ => to_kebab_case(&self.name),
        }
    }

    /// Name used in settings keys, usage lines and error messages.
    pub fn argument_name(&self) -> String {
        self.long_name()
    }

    pub fn env_var_name(&self) -> String {
        self.env_var
            .clone()
            .unwrap_or_else(|| to_screaming_snake_case(&self.name))
    }

    /// Placeholder shown after a named option taking a value.
    pub fn value_word(&self) -> String {
        last_word(&self.name)
    }
}
