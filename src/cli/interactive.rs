//! Interactive prompts and direct value assignment.

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::Cli;
use crate::error::{ArgbindError, Result};
use crate::help::usage::field_doc;
use crate::model::Configurable;
use crate::resolve::sources::parse_raw;
use crate::resolve::descriptor::{extract, find_by_name};
use crate::resolve::{commit, Descriptor, FieldKinds};
use crate::terminal::Console;

impl Cli {
    /// Prompt for a field marked interactive until a valid value is entered.
    ///
    /// Empty input keeps the current value when the field accepts defaults
    /// on empty input, and asks again otherwise. Invalid input is reported
    /// and asked again. An interrupted read stops the prompt.
    pub fn ask(&self, console: &mut dyn Console, target: &mut dyn Configurable, field: &str) -> Result<()> {
        if field.is_empty() {
            return Err(ArgbindError::precondition(self.catalog().must_not_be_empty("field")));
        }
        let schema = target.schema();
        let scope = self.scope(schema);
        let catalog = self.catalog();

        let spec = schema
            .find(field)
            .ok_or_else(|| scope.error(catalog.unknown_field(field)))?;
        let Some(interactive) = &spec.interactive else {
            return Err(ArgbindError::unsupported(catalog.not_interactive(field)));
        };
        let mut descriptor = Descriptor::single(spec);

        loop {
            let mut prompt = format!("{}:\n", interactive.label);
            field_doc(&mut prompt, spec, target.value(field).as_ref(), catalog, true, "");
            if interactive.default_on_empty {
                prompt.push_str(&catalog.press_enter_for_default());
                prompt.push('\n');
            }
            prompt.push_str(&catalog.press_ctrl_c());
            prompt.push('\n');
            console.write(&prompt)?;
            console.write("> ")?;

            let input = if spec.secret {
                console.read_secret()?
            } else {
                Zeroizing::new(console.read_line()?)
            };

            if input.is_empty() {
                if interactive.default_on_empty {
                    debug!("Keeping current value of {}", field);
                    return Ok(());
                }
                continue;
            }

            match parse_raw(&input, &descriptor, &scope) {
                Ok(value) => {
                    descriptor.set_pending(value);
                    return commit(target, std::slice::from_mut(&mut descriptor));
                }
                Err(e) if e.is_parse_error() => {
                    console.write(&format!("{}\n{}\n", e, catalog.please_retry()))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask a yes/no question. Answers are matched case-insensitively as a
    /// prefix of either option, `no` first; empty answers ask again.
    pub fn confirm(&self, console: &mut dyn Console, label: &str, yes: &str, no: &str) -> Result<bool> {
        for (argument, value) in [("label", label), ("yes", yes), ("no", no)] {
            if value.is_empty() {
                return Err(ArgbindError::precondition(self.catalog().must_not_be_empty(argument)));
            }
        }
        let yes_lower = yes.to_lowercase();
        let no_lower = no.to_lowercase();

        loop {
            console.write(&format!("{} [{}/{}]\n", label, yes, no))?;
            console.write("> ")?;
            let answer = console.read_line()?.to_lowercase();
            let answer = answer.trim_start();
            if answer.is_empty() {
                continue;
            }
            if no_lower.starts_with(answer) {
                return Ok(false);
            }
            if yes_lower.starts_with(answer) {
                return Ok(true);
            }
        }
    }

    /// "Would you like to continue?" with the catalog's yes/no words. A
    /// negative answer is reported as an interrupt.
    pub fn confirm_continue(&self, console: &mut dyn Console) -> Result<()> {
        let catalog = self.catalog();
        if self.confirm(console, &catalog.continue_question(), &catalog.yes(), &catalog.no())? {
            Ok(())
        } else {
            Err(ArgbindError::interrupted(catalog.user_discontinued()))
        }
    }

    /// Validate, convert and assign a raw value to a field of any kind.
    /// Fields without a kind are not bindable and are reported as unknown.
    pub fn set_value(&self, target: &mut dyn Configurable, field: &str, raw: &str) -> Result<()> {
        if field.is_empty() {
            return Err(ArgbindError::precondition(self.catalog().must_not_be_empty("field")));
        }
        let schema = target.schema();
        let scope = self.scope(schema);

        let mut descriptors = extract(schema, FieldKinds::ALL);
        let descriptor = find_by_name(&mut descriptors, field)
            .ok_or_else(|| scope.error(self.catalog().unknown_field(field)))?;
        let value = parse_raw(raw, descriptor, &scope)?;
        descriptor.set_pending(value);
        commit(target, &mut descriptors)
    }

    /// Command-line name of a field: its long name, or its derived name
    /// for positional and unplaced fields.
    pub fn long_name_of(&self, target: &dyn Configurable, field: &str) -> Result<String> {
        let schema = target.schema();
        schema
            .find(field)
            .map(|spec| spec.long_name())
            .ok_or_else(|| self.scope(schema).error(self.catalog().unknown_field(field)))
    }
}
