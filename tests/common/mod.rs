//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::OnceLock;

use argbind::{
    ArgbindError, Cli, Configurable, Console, EnumType, FieldSpec, Result, Schema, Settings, Value,
    ValueType,
};
use zeroize::Zeroizing;

pub const MODE: EnumType = EnumType::new("Mode", &["Fast", "Safe"]);

/// Program-level configuration exercising every source.
#[derive(Debug, Default)]
pub struct Sender {
    pub tasks: Option<i64>,
    pub source: Option<String>,
    pub hosts: Vec<String>,
    pub level: Option<i64>,
    pub my_flag: Option<i64>,
    pub mode: Option<String>,
    pub user_password: Option<String>,
    pub verbose: bool,
}

impl Configurable for Sender {
    fn schema(&self) -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::program()
                .doc("[[program]] sends messages")
                .generate_sample()
                .field(
                    FieldSpec::named("tasks", ValueType::INTEGER)
                        .short('t')
                        .range(1, 128)
                        .sample("8")
                        .doc("Number of tasks"),
                )
                .field(FieldSpec::named("source", ValueType::STRING).required())
                .field(FieldSpec::named("hosts", ValueType::STRINGS).pattern("^[a-z.,]+$"))
                .field(FieldSpec::named("level", ValueType::INTEGER).env())
                .field(FieldSpec::new("my_flag", ValueType::INTEGER).env().range(0, 10))
                .field(FieldSpec::named("mode", ValueType::enumeration(MODE)).persisted())
                .field(
                    FieldSpec::named("user_password", ValueType::STRING)
                        .secret()
                        .env_var("USER_PASSWORD")
                        .sample("topsecret")
                        .interactive("Password", false),
                )
                .field(FieldSpec::named("verbose", ValueType::BOOLEAN).short('v'))
        })
    }

    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "tasks" => self.tasks.map(Value::from),
            "source" => self.source.clone().map(Value::from),
            "hosts" => Some(Value::from(self.hosts.clone())),
            "level" => self.level.map(Value::from),
            "my_flag" => self.my_flag.map(Value::from),
            "mode" => self.mode.clone().map(Value::enumeration),
            "user_password" => self.user_password.clone().map(Value::from),
            "verbose" => Some(Value::from(self.verbose)),
            _ => None,
        }
    }

    fn apply(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "tasks" => self.tasks = Some(value.try_into()?),
            "source" => self.source = Some(value.try_into()?),
            "hosts" => self.hosts = value.try_into()?,
            "level" => self.level = Some(value.try_into()?),
            "my_flag" => self.my_flag = Some(value.try_into()?),
            "mode" => self.mode = Some(value.to_string()),
            "user_password" => self.user_password = Some(value.try_into()?),
            "verbose" => self.verbose = value.try_into()?,
            _ => {}
        }
        Ok(())
    }
}

/// Command with positional and rest-of-arguments fields.
#[derive(Debug, Default)]
pub struct Copy {
    pub target: Option<String>,
    pub files: Vec<String>,
    pub force: bool,
}

impl Configurable for Copy {
    fn schema(&self) -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::command("copy")
                .doc("Copies files with [[program]] [[command]]")
                .default_command()
                .field(FieldSpec::positional("target", ValueType::STRING).required())
                .field(FieldSpec::positional("files", ValueType::STRINGS).rest_of_arguments())
                .field(FieldSpec::named("force", ValueType::BOOLEAN).short('f'))
        })
    }

    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "target" => self.target.clone().map(Value::from),
            "files" => Some(Value::from(self.files.clone())),
            "force" => Some(Value::from(self.force)),
            _ => None,
        }
    }

    fn apply(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "target" => self.target = Some(value.try_into()?),
            "files" => self.files = value.try_into()?,
            "force" => self.force = value.try_into()?,
            _ => {}
        }
        Ok(())
    }
}

/// Command without a default marker.
#[derive(Debug, Default)]
pub struct Purge {
    pub older_than_days: Option<i64>,
}

impl Configurable for Purge {
    fn schema(&self) -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::command("purge")
                .field(FieldSpec::named("older_than_days", ValueType::INTEGER).min(1))
        })
    }

    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "older_than_days" => self.older_than_days.map(Value::from),
            _ => None,
        }
    }

    fn apply(&mut self, field: &str, value: Value) -> Result<()> {
        if field == "older_than_days" {
            self.older_than_days = Some(value.try_into()?);
        }
        Ok(())
    }
}

pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Engine isolated from the process environment.
pub fn cli(settings: &[(&str, &str)], vars: &[(&str, &str)]) -> Cli {
    Cli::new("sender", "1.4.0")
        .with_settings(Settings::from_pairs(settings.iter().copied()))
        .with_env(env(vars))
}

/// Console fed from a fixed list of lines; running out is an interrupt.
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    pub output: String,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            output: String::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        self.lines
            .pop_front()
            .ok_or_else(|| ArgbindError::interrupted("Input has been interrupted by user"))
    }

    fn read_secret(&mut self) -> Result<Zeroizing<String>> {
        self.read_line().map(Zeroizing::new)
    }
}
