//! Rendering entry points on [`Cli`].

use std::fmt::Write;

use crate::cli::Cli;
use crate::help::display::{render_setting, render_value};
use crate::help::usage::{
    command_docs, env_snippet, field_doc, is_env_exposed, is_selected, is_settings_key, prompt_symbol,
    sample_invocation, usage_fragment,
};
use crate::help::{ArgsView, HelpDetail};
use crate::model::Configurable;
use crate::resolve::sources::settings_keys;
use crate::resolve::{extract, FieldKinds};
use crate::utils::xml::escape_xml;

/// Usage line fragments, field docs and environment snippets collected in
/// one pass over a schema.
#[derive(Default)]
struct Sections {
    usage: String,
    docs: String,
    env: String,
}

impl Cli {
    fn collect_sections(&self, target: &dyn Configurable, detail: HelpDetail, sections: &mut Sections) {
        let catalog = self.catalog();
        for spec in target.schema().fields() {
            let current = target.value(&spec.name);
            if (spec.is_named() || spec.is_positional()) && is_selected(spec, detail) {
                sections.usage.push_str(&usage_fragment(spec));
                field_doc(&mut sections.docs, spec, current.as_ref(), catalog, false, "");
            }
            if detail.contains(HelpDetail::ENVIRONMENT) && is_env_exposed(spec) {
                env_snippet(&mut sections.env, spec, current.as_ref(), catalog);
            }
        }
        sections.usage.push('\n');
    }

    fn finish_sections(&self, sections: Sections) -> String {
        let mut out = sections.usage;
        out.push('\n');
        out.push_str(&sections.docs);
        if !sections.env.is_empty() {
            let _ = writeln!(out, "{}", self.catalog().all_environment_variables());
            out.push_str(&sections.env);
        }
        out
    }

    /// Usage of a single-command program.
    pub fn render_usage(&self, program: &mut dyn Configurable, detail: HelpDetail) -> String {
        self.refresh(program, FieldKinds::FOR_PARSING, true);
        let target: &dyn Configurable = program;

        let mut sections = Sections {
            usage: self.catalog().usage_program(prompt_symbol(), self.program()),
            ..Default::default()
        };
        self.collect_sections(target, detail, &mut sections);
        command_docs(&mut sections.usage, target.schema(), self.program(), self.version(), "   ");
        if target.schema().generates_sample() {
            sample_invocation(&mut sections.usage, self.catalog(), self.program(), target);
        }
        self.finish_sections(sections)
    }

    /// Usage of a program with commands: the program docs and a one-line
    /// summary per command.
    pub fn render_commands_usage(
        &self,
        program: &dyn Configurable,
        commands: &[&mut dyn Configurable],
        detail: HelpDetail,
    ) -> String {
        let catalog = self.catalog();
        let mut out = String::new();
        command_docs(&mut out, program.schema(), self.program(), self.version(), "   ");
        let _ = writeln!(
            out,
            "{}",
            catalog.usage_program_with_commands(prompt_symbol(), self.program())
        );
        out.push('\n');
        let _ = writeln!(out, "{}", catalog.available_commands());

        for command in commands {
            let schema = command.schema();
            let marker = if schema.is_default_command() { "*" } else { "" };
            let _ = write!(
                out,
                "  {}{} [-h|--help] ",
                marker,
                schema.command_name().unwrap_or_default()
            );
            for spec in schema.fields() {
                if (spec.is_named() || spec.is_positional()) && is_selected(spec, detail) {
                    out.push_str(&usage_fragment(spec));
                }
            }
            out.push('\n');
            command_docs(&mut out, schema, self.program(), self.version(), "   ");
            out.push('\n');
        }
        out
    }

    /// Usage of one command.
    pub fn render_command_usage(&self, command: &mut dyn Configurable, detail: HelpDetail) -> String {
        self.refresh(command, FieldKinds::FOR_PARSING | FieldKinds::INTERACTIVE, true);
        let target: &dyn Configurable = command;
        let schema = target.schema();

        let mut sections = Sections {
            usage: self.catalog().usage_command(
                prompt_symbol(),
                self.program(),
                schema.command_name().unwrap_or_default(),
            ),
            ..Default::default()
        };
        self.collect_sections(target, detail, &mut sections);
        command_docs(&mut sections.usage, schema, self.program(), self.version(), "   ");
        if schema.generates_sample() {
            sample_invocation(&mut sections.usage, self.catalog(), self.program(), target);
        }
        self.finish_sections(sections)
    }

    /// Settings template listing every settings-backed field of the program
    /// and its commands with the value currently resolved from settings.
    pub fn render_settings(&self, program: &mut dyn Configurable, commands: &mut [&mut dyn Configurable]) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n");
        out.push_str("<configuration>\n");
        out.push_str(" <appSettings>\n");
        self.append_settings(&mut out, program);
        for command in commands.iter_mut() {
            self.append_settings(&mut out, &mut **command);
        }
        out.push_str(" </appSettings>\n");
        out.push_str("</configuration>\n");
        out
    }

    fn append_settings(&self, out: &mut String, target: &mut dyn Configurable) {
        self.refresh(target, FieldKinds::ALL, false);
        let target: &dyn Configurable = target;
        let catalog = self.catalog();
        let schema = target.schema();

        let title = match schema.command_name() {
            Some(command) => catalog.command_settings(command),
            None => catalog.program_settings(),
        };
        let _ = writeln!(out, "  <!-- {} -->", title);
        out.push('\n');

        for spec in schema.fields().iter().filter(|s| is_settings_key(s)) {
            let current = target.value(&spec.name);
            out.push_str("  <!--\n");
            if let Some(doc) = &spec.doc {
                let _ = writeln!(out, "   - {}", doc);
            }
            field_doc(out, spec, current.as_ref(), catalog, true, "");
            out.push_str("  -->\n");

            let key = settings_keys(self.namespace(), schema.command_name(), &spec.argument_name())
                .swap_remove(0);
            let _ = writeln!(out, "  <add key=\"{}\"", escape_xml(&key));
            let _ = writeln!(
                out,
                "       value=\"{}\"/>",
                escape_xml(&render_setting(current.as_ref(), spec))
            );
        }
        out.push('\n');
    }

    /// Dump of current field values, restricted to the given kinds.
    pub fn render_args(&self, target: &dyn Configurable, view: ArgsView, kinds: FieldKinds) -> String {
        let mut out = String::new();
        if view.contains(ArgsView::HEADER) {
            let _ = writeln!(out, "{}", self.catalog().running_with_arguments());
        }

        for descriptor in extract(target.schema(), kinds) {
            let spec = descriptor.spec();
            let value = render_value(target.value(&spec.name).as_ref(), spec);
            let name = spec.argument_name();
            let typed = if view.contains(ArgsView::DATA_TYPES) {
                format!("{} [{}]", value, spec.value_type.to_string().to_lowercase())
            } else {
                value
            };

            match &spec.doc {
                Some(doc) if view.contains(ArgsView::DOCS) => {
                    if view.contains(ArgsView::NAMES) {
                        let _ = writeln!(out, "   {} / {}", doc, name);
                    } else {
                        let _ = writeln!(out, "   {}", doc);
                    }
                    let _ = writeln!(out, "      = {}", typed);
                }
                _ if view.contains(ArgsView::NAMES) => {
                    let _ = writeln!(out, "      {} = {}", name, typed);
                }
                _ => {}
            }
        }
        out
    }

    /// The invocation as typed, for echoing before a run.
    pub fn render_command_line<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.catalog().command_line_provided());
        let _ = write!(out, "{} {} ", prompt_symbol(), self.program());
        for arg in args {
            let _ = write!(out, "{} ", arg.as_ref());
        }
        out.push('\n');
        out
    }

    pub fn render_version(&self) -> String {
        format!("{}\n", self.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::error::Result;
    use crate::model::{FieldSpec, Schema, Value, ValueType};
    use std::collections::HashMap;
    use std::sync::OnceLock;

    #[derive(Default)]
    struct Upload {
        target: Option<String>,
        retries: Option<i64>,
        token: Option<String>,
    }

    impl Configurable for Upload {
        fn schema(&self) -> &'static Schema {
            static SCHEMA: OnceLock<Schema> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                Schema::command("upload")
                    .doc("Uploads files with [[program]] [[version]]")
                    .field(FieldSpec::positional("target", ValueType::STRING).required().doc("Destination"))
                    .field(FieldSpec::named("retries", ValueType::INTEGER).short('r').range(0, 5))
                    .field(FieldSpec::new("token", ValueType::STRING).env().persisted().secret())
            })
        }

        fn value(&self, field: &str) -> Option<Value> {
            match field {
                "target" => self.target.clone().map(Value::from),
                "retries" => self.retries.map(Value::from),
                "token" => self.token.clone().map(Value::from),
                _ => None,
            }
        }

        fn apply(&mut self, field: &str, value: Value) -> Result<()> {
            match field {
                "target" => self.target = Some(value.try_into()?),
                "retries" => self.retries = Some(value.try_into()?),
                "token" => self.token = Some(value.try_into()?),
                _ => {}
            }
            Ok(())
        }
    }

    fn cli() -> Cli {
        Cli::new("tool", "2.0")
            .with_env(HashMap::from([("TOKEN".to_string(), "s3cret".to_string())]))
            .with_settings(Settings::from_pairs([("Cli.upload.retries", "3")]))
    }

    #[test]
    fn test_command_usage_refreshes_and_masks() {
        let mut upload = Upload::default();
        let text = cli().render_command_usage(&mut upload, HelpDetail::FULL);
        assert!(text.starts_with(&format!(
            "Usage: {} tool upload [-h|--help] | <target> [-r|--retries retries] \n",
            prompt_symbol()
        )));
        assert!(text.contains("   - Uploads files with tool 2.0\n"));
        assert!(text.contains("   - optional, default value is 3\n"));
        assert!(text.contains("All allowed environment variables:\n"));
        assert!(text.contains("export TOKEN=\"***\";"));
        assert!(!text.contains("s3cret"));
        assert_eq!(upload.retries, Some(3));
    }

    #[test]
    fn test_commands_usage_marks_default() {
        let program = Upload::default();
        let mut upload = Upload::default();
        let commands: [&mut dyn Configurable; 1] = [&mut upload];
        let text = cli().render_commands_usage(&program, &commands, HelpDetail::QUICK);
        assert!(text.contains("Available commands: \n  upload [-h|--help] <target> [-r|--retries retries] \n"));
    }

    #[test]
    fn test_settings_template() {
        let mut program = Upload::default();
        let text = cli().render_settings(&mut program, &mut []);
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n<configuration>\n <appSettings>\n"));
        assert!(text.contains("  <!-- upload command settings -->\n"));
        assert!(text.contains("  <add key=\"Cli.upload.retries\"\n       value=\"3\"/>\n"));
        assert!(text.contains("  <add key=\"Cli.upload.token\"\n       value=\"***\"/>\n"));
        assert!(!text.contains("Cli.upload.target"));
        assert!(text.ends_with(" </appSettings>\n</configuration>\n"));
    }

    #[test]
    fn test_args_views() {
        let upload = Upload {
            target: Some("bucket".to_string()),
            retries: Some(2),
            token: Some("s3cret".to_string()),
        };
        let cli = cli();
        let all = cli.render_args(&upload, ArgsView::ALL, FieldKinds::ALL);
        assert_eq!(
            all,
            "Running with arguments:\n   Destination / target\n      = bucket [string]\n      retries = 2 [integer]\n      token = *** [string]\n"
        );

        let named = cli.render_args(&upload, ArgsView::NAMES, FieldKinds::NAMED_OR_POSITIONAL);
        assert_eq!(named, "      target = bucket\n      retries = 2\n");
    }

    #[test]
    fn test_command_line_echo() {
        let text = cli().render_command_line(&["-r", "2"]);
        assert_eq!(text, format!("Command line provided:\n{} tool -r 2 \n", prompt_symbol()));
    }
}
