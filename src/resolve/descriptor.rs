//! Transient per-call field descriptors.

use crate::model::{FieldSpec, Schema, Value, ValueType};
use crate::utils::mask::mask_type;

mask_type!(
    /// Kind filter used when extracting descriptors.
    FieldKinds {
        NAMED_OR_POSITIONAL = 1;
        PERSISTED = 2;
        INTERACTIVE = 4;
        ENVIRONMENT = 8;
        /// Kinds bound by an ordinary parse.
        FOR_PARSING = 1 | 2 | 8;
        ALL = 1 | 2 | 4 | 8;
    }
);

impl FieldKinds {
    /// Every kind a field carries, regardless of any filter.
    pub fn of(spec: &FieldSpec) -> Self {
        let mut kinds = Self::empty();
        if spec.is_named() || spec.is_positional() {
            kinds |= Self::NAMED_OR_POSITIONAL;
        }
        if spec.persisted {
            kinds |= Self::PERSISTED;
        }
        if spec.interactive.is_some() {
            kinds |= Self::INTERACTIVE;
        }
        if spec.environment {
            kinds |= Self::ENVIRONMENT;
        }
        kinds
    }
}

/// One field of a configuration object as seen by a single resolution call.
#[derive(Debug, Clone)]
pub struct Descriptor<'s> {
    spec: &'s FieldSpec,
    kinds: FieldKinds,
    position: Option<usize>,
    pending: Option<Value>,
}

impl<'s> Descriptor<'s> {
    /// Descriptor of a single field outside any extraction, for direct
    /// assignment. It has no position.
    pub fn single(spec: &'s FieldSpec) -> Self {
        Self {
            spec,
            kinds: FieldKinds::of(spec),
            position: None,
            pending: None,
        }
    }

    pub fn spec(&self) -> &'s FieldSpec {
        self.spec
    }

    pub fn name(&self) -> &'s str {
        &self.spec.name
    }

    pub fn kinds(&self) -> FieldKinds {
        self.kinds
    }

    pub fn value_type(&self) -> ValueType {
        self.spec.value_type
    }

    /// Zero-based position among the positional fields of the schema.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_named(&self) -> bool {
        self.spec.is_named()
    }

    pub fn is_positional(&self) -> bool {
        self.spec.is_positional()
    }

    pub fn is_persisted(&self) -> bool {
        self.kinds.contains(FieldKinds::PERSISTED)
    }

    pub fn is_interactive(&self) -> bool {
        self.kinds.contains(FieldKinds::INTERACTIVE)
    }

    pub fn is_environment(&self) -> bool {
        self.kinds.contains(FieldKinds::ENVIRONMENT)
    }

    pub fn is_flag(&self) -> bool {
        self.spec.is_flag()
    }

    pub fn is_required(&self) -> bool {
        self.spec.required
    }

    pub fn is_rest(&self) -> bool {
        self.spec.is_rest()
    }

    pub fn is_secret(&self) -> bool {
        self.spec.secret
    }

    pub fn argument_name(&self) -> String {
        self.spec.argument_name()
    }

    pub fn env_var(&self) -> String {
        self.spec.env_var_name()
    }

    pub fn pending(&self) -> Option<&Value> {
        self.pending.as_ref()
    }

    /// Record a resolved value, replacing whatever an earlier source found.
    pub fn set_pending(&mut self, value: Value) {
        self.pending = Some(value);
    }

    pub fn take_pending(&mut self) -> Option<Value> {
        self.pending.take()
    }
}

/// Build the descriptors of every field matching `filter`.
///
/// Positions are counted over all positional fields of the schema, so a
/// narrower filter yields the same indices.
pub fn extract(schema: &Schema, filter: FieldKinds) -> Vec<Descriptor<'_>> {
    let mut next_position = 0;
    let mut descriptors = Vec::new();

    for spec in schema.fields() {
        let position = if spec.is_positional() {
            next_position += 1;
            Some(next_position - 1)
        } else {
            None
        };

        let kinds = FieldKinds::of(spec);
        if kinds.intersects(filter) {
            descriptors.push(Descriptor {
                spec,
                kinds,
                position,
                pending: None,
            });
        }
    }
    descriptors
}

pub fn find_by_short<'a, 's>(descriptors: &'a mut [Descriptor<'s>], short: char) -> Option<&'a mut Descriptor<'s>> {
    descriptors
        .iter_mut()
        .find(|d| d.spec.short_name() == Some(short))
}

pub fn find_by_long<'a, 's>(descriptors: &'a mut [Descriptor<'s>], long: &str) -> Option<&'a mut Descriptor<'s>> {
    descriptors
        .iter_mut()
        .find(|d| d.is_named() && d.spec.long_name() == long)
}

pub fn find_by_position<'a, 's>(descriptors: &'a mut [Descriptor<'s>], position: usize) -> Option<&'a mut Descriptor<'s>> {
    descriptors
        .iter_mut()
        .find(|d| d.position == Some(position))
}

pub fn find_by_name<'a, 's>(descriptors: &'a mut [Descriptor<'s>], name: &str) -> Option<&'a mut Descriptor<'s>> {
    descriptors.iter_mut().find(|d| d.name() == name)
}
