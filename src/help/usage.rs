//! Building blocks of usage and help text.

use std::fmt::Write;

use crate::help::display::{render_sample, render_value};
use crate::help::HelpDetail;
use crate::locale::Catalog;
use crate::model::{Configurable, FieldSpec, ScalarType, Schema, Value, ValueType};

/// Command-line prompt glyph of the platform.
pub fn prompt_symbol() -> &'static str {
    if cfg!(unix) {
        "$"
    } else {
        ">"
    }
}

pub fn is_short_or_positional(spec: &FieldSpec) -> bool {
    (spec.is_named() && spec.short_name().is_some()) || spec.is_positional()
}

pub fn is_long_only(spec: &FieldSpec) -> bool {
    spec.is_named() && spec.short_name().is_none()
}

pub fn is_env_exposed(spec: &FieldSpec) -> bool {
    spec.environment && !spec.required
}

/// Fields listed in the generated settings template.
pub fn is_settings_key(spec: &FieldSpec) -> bool {
    (spec.is_named() || spec.is_positional() || spec.persisted) && !spec.required
}

pub fn is_selected(spec: &FieldSpec, detail: HelpDetail) -> bool {
    (detail.contains(HelpDetail::SHORT_AND_POSITIONAL) && is_short_or_positional(spec))
        || (detail.contains(HelpDetail::LONG_NAMED) && is_long_only(spec))
        || (detail.contains(HelpDetail::ENVIRONMENT) && is_env_exposed(spec))
}

fn bracketed(text: &str, required: bool) -> String {
    if required {
        format!("<{}> ", text)
    } else {
        format!("[{}] ", text)
    }
}

/// Inline usage fragment of a named or positional field, with a trailing
/// space. Other fields have no command-line form.
pub fn usage_fragment(spec: &FieldSpec) -> String {
    let long = spec.long_name();
    if spec.is_named() {
        let names = match spec.short_name() {
            Some(short) => format!("-{}|--{}", short, long),
            None => format!("--{}", long),
        };
        if spec.is_flag() {
            bracketed(&names, spec.required)
        } else {
            bracketed(&format!("{} {}", names, spec.value_word()), spec.required)
        }
    } else if spec.is_rest() {
        let name = spec.argument_name();
        if spec.required {
            format!("<{0}1> [{0}2] ... [{0}N] ", name)
        } else {
            format!("[{0}1] [{0}2] ... [{0}N] ", name)
        }
    } else if spec.is_positional() {
        bracketed(&spec.argument_name(), spec.required)
    } else {
        String::new()
    }
}

fn type_line(spec: &FieldSpec, catalog: &dyn Catalog) -> String {
    match spec.value_type {
        ValueType::Scalar(ScalarType::Enum(e)) => catalog.enum_type(e.name, &e.variants.join(",")),
        ValueType::Array(ScalarType::Enum(e)) => {
            catalog.enum_array_type(&spec.value_type.to_string(), &e.variants.join(","))
        }
        other => catalog.data_type(&other.to_string()),
    }
}

/// Verbose help block of a field. Every line starts with `prefix`; with
/// `skip_header` the usage fragment and free-text doc lines are left out.
pub fn field_doc(
    out: &mut String,
    spec: &FieldSpec,
    current: Option<&Value>,
    catalog: &dyn Catalog,
    skip_header: bool,
    prefix: &str,
) {
    if !skip_header {
        let _ = writeln!(out, " {}", usage_fragment(spec));
        if let Some(doc) = &spec.doc {
            let _ = writeln!(out, "{}   - {}", prefix, doc);
        }
    }

    let mut line = |text: String| {
        let _ = writeln!(out, "{}{}", prefix, text);
    };

    line(type_line(spec, catalog));
    if let Some((min, max)) = spec.range {
        line(catalog.allowed_range(min, max));
    }
    if let Some(pattern) = &spec.pattern {
        line(catalog.allowed_pattern(&pattern.regex));
    }
    if let Some(sample) = render_sample(spec) {
        line(catalog.sample_line(&sample));
    }
    if spec.required {
        line(catalog.required_line());
    } else {
        line(catalog.default_line(&render_value(current, spec)));
    }
    if spec.is_rest() {
        line(catalog.rest_line());
    }
    if spec.environment {
        line(catalog.env_line(&spec.env_var_name()));
    }
    if spec.secret {
        line(catalog.secret_line());
    }
}

/// Commented doc block and `export` line of an environment-exposed field.
pub fn env_snippet(out: &mut String, spec: &FieldSpec, current: Option<&Value>, catalog: &dyn Catalog) {
    if let Some(doc) = &spec.doc {
        let _ = writeln!(out, "#   - {}", doc);
    }
    field_doc(out, spec, current, catalog, true, "#");
    let _ = writeln!(
        out,
        "export {}=\"{}\";",
        spec.env_var_name(),
        render_value(current, spec)
    );
}

/// Doc lines of a program or command with `[[program]]`, `[[command]]`
/// and `[[version]]` substituted.
pub fn command_docs(out: &mut String, schema: &Schema, program: &str, version: &str, prefix: &str) {
    for doc in schema.docs() {
        let mut line = doc.replace("[[program]]", program);
        if let Some(command) = schema.command_name() {
            line = line.replace("[[command]]", command);
        }
        line = line.replace("[[version]]", version);
        let _ = writeln!(out, "{}- {}", prefix, line);
    }
}

/// Synthesized invocation using sample values, falling back to current
/// values. Named fields appear when required or when they have a sample.
pub fn sample_invocation(out: &mut String, catalog: &dyn Catalog, program: &str, target: &dyn Configurable) {
    let schema = target.schema();
    out.push_str(&catalog.sample_prefix());
    let _ = write!(out, "{} {}", prompt_symbol(), program);
    if let Some(command) = schema.command_name() {
        let _ = write!(out, " {}", command);
    }

    for spec in schema.fields() {
        let text = || render_sample(spec).unwrap_or_else(|| render_value(target.value(&spec.name).as_ref(), spec));
        if spec.is_positional() {
            if spec.is_rest() {
                let _ = write!(out, " {}", text());
            } else {
                let _ = write!(out, " \"{}\"", text());
            }
        } else if spec.is_named() && (spec.required || spec.sample.is_some()) {
            match spec.short_name() {
                Some(short) => {
                    let _ = write!(out, " -{}", short);
                }
                None => {
                    let _ = write!(out, " --{}", spec.long_name());
                }
            }
            if !spec.is_flag() {
                let _ = write!(out, " \"{}\"", text());
            }
        }
    }
    out.push('\n');
    if let Some(title) = schema.sample_title() {
        let _ = writeln!(out, "   - {}", title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::English;
    use crate::model::EnumType;

    const MODE: EnumType = EnumType::new("Mode", &["Fast", "Safe"]);

    #[test]
    fn test_fragments() {
        let flag = FieldSpec::named("verbose", ValueType::BOOLEAN).short('v');
        assert_eq!(usage_fragment(&flag), "[-v|--verbose] ");

        let value = FieldSpec::named("broker_uri", ValueType::STRING).required();
        assert_eq!(usage_fragment(&value), "<--broker-uri uri> ");

        let positional = FieldSpec::positional("target", ValueType::STRING);
        assert_eq!(usage_fragment(&positional), "[target] ");

        let rest = FieldSpec::positional("file", ValueType::STRINGS).rest_of_arguments();
        assert_eq!(usage_fragment(&rest), "[file1] [file2] ... [fileN] ");
        assert_eq!(usage_fragment(&rest.required()), "<file1> [file2] ... [fileN] ");

        assert_eq!(usage_fragment(&FieldSpec::new("hidden", ValueType::STRING).env()), "");
    }

    #[test]
    fn test_selection() {
        let short = FieldSpec::named("tasks", ValueType::INTEGER).short('t');
        let long = FieldSpec::named("tasks", ValueType::INTEGER);
        let env = FieldSpec::new("token", ValueType::STRING).env();
        assert!(is_selected(&short, HelpDetail::QUICK));
        assert!(!is_selected(&long, HelpDetail::QUICK));
        assert!(is_selected(&long, HelpDetail::FULL));
        assert!(!is_selected(&env, HelpDetail::QUICK));
        assert!(is_selected(&env, HelpDetail::ENVIRONMENT));
        assert!(!is_selected(&env.required(), HelpDetail::FULL));
    }

    #[test]
    fn test_field_doc_lines() {
        let spec = FieldSpec::named("mode", ValueType::enumeration(MODE))
            .short('m')
            .doc("How to run")
            .sample("Safe")
            .env();
        let mut out = String::new();
        field_doc(&mut out, &spec, Some(&Value::enumeration("Fast")), &English, false, "");
        assert_eq!(
            out,
            " [-m|--mode mode] \n\
             \x20  - How to run\n\
             \x20  - the data type is enum [Mode], possible values: Fast,Safe\n\
             \x20  - sample value is Safe\n\
             \x20  - optional, default value is Fast\n\
             \x20  - could be passed via environment variable $MODE\n"
        );
    }

    #[test]
    fn test_env_snippet() {
        let spec = FieldSpec::new("user_password", ValueType::STRING).env().secret().doc("Password");
        let mut out = String::new();
        env_snippet(&mut out, &spec, Some(&Value::from("hunter2")), &English);
        assert!(out.starts_with("#   - Password\n#   - the data type is [string] \n"));
        assert!(out.ends_with("export USER_PASSWORD=\"***\";\n"));
        assert!(!out.contains("hunter2"));
    }

    #[test]
    fn test_command_docs_placeholders() {
        let schema = Schema::command("send").doc("[[program]] [[command]] v[[version]]");
        let mut out = String::new();
        command_docs(&mut out, &schema, "tool", "1.2.3", "   ");
        assert_eq!(out, "   - tool send v1.2.3\n");
    }
}
