//! Per-type tables describing configuration objects.

use crate::error::Result;
use crate::model::field::FieldSpec;
use crate::model::value::Value;

/// Static description of a program or of one of its commands.
///
/// Schemas are meant to be built once per type, typically behind a
/// `std::sync::OnceLock`, and handed out as `&'static Schema`.
#[derive(Debug, Clone)]
pub struct Schema {
    command: Option<String>,
    docs: Vec<String>,
    sample: Option<Option<String>>,
    default_command: bool,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Schema of the root program object.
    pub fn program() -> Self {
        Self {
            command: None,
            docs: Vec::new(),
            sample: None,
            default_command: false,
            fields: Vec::new(),
        }
    }

    pub fn command<S: Into<String>>(name: S) -> Self {
        Self {
            command: Some(name.into()),
            ..Self::program()
        }
    }

    /// Documentation line. `[[program]]`, `[[command]]` and `[[version]]`
    /// are substituted when rendered.
    pub fn doc<S: Into<String>>(mut self, line: S) -> Self {
        self.docs.push(line.into());
        self
    }

    /// Render a synthesized sample invocation in usage output.
    pub fn generate_sample(mut self) -> Self {
        self.sample = Some(None);
        self
    }

    pub fn generate_sample_titled<S: Into<String>>(mut self, title: S) -> Self {
        self.sample = Some(Some(title.into()));
        self
    }

    /// Parse this command when a multi-command program gets no arguments.
    pub fn default_command(mut self) -> Self {
        self.default_command = true;
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn command_name(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn docs(&self) -> &[String] {
        &self.docs
    }

    pub fn generates_sample(&self) -> bool {
        self.sample.is_some()
    }

    pub fn sample_title(&self) -> Option<&str> {
        self.sample.as_ref().and_then(|title| title.as_deref())
    }

    pub fn is_default_command(&self) -> bool {
        self.default_command
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn find(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A configuration object whose fields are bound by the engine.
pub trait Configurable {
    fn schema(&self) -> &'static Schema;

    /// Current value of a field, `None` when unset.
    fn value(&self, field: &str) -> Option<Value>;

    /// Commit a converted value into a field.
    fn apply(&mut self, field: &str, value: Value) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::value::ValueType;

    #[test]
    fn test_builder() {
        let schema = Schema::command("send")
            .doc("Sends messages")
            .generate_sample_titled("send ten messages")
            .default_command()
            .field(FieldSpec::named("count", ValueType::INTEGER))
            .field(FieldSpec::positional("target", ValueType::STRING));

        assert_eq!(schema.command_name(), Some("send"));
        assert_eq!(schema.docs(), ["Sends messages".to_string()]);
        assert!(schema.generates_sample());
        assert_eq!(schema.sample_title(), Some("send ten messages"));
        assert!(schema.is_default_command());
        assert_eq!(schema.fields().len(), 2);
        assert!(schema.find("target").is_some());
        assert!(schema.find("missing").is_none());
    }

    #[test]
    fn test_program_defaults() {
        let schema = Schema::program().generate_sample();
        assert_eq!(schema.command_name(), None);
        assert!(schema.generates_sample());
        assert_eq!(schema.sample_title(), None);
        assert!(!schema.is_default_command());
    }
}
