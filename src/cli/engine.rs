//! The resolution engine and its entry points.

use tracing::{debug, warn};

use crate::config::{EnvSource, ProcessEnv, Settings, SettingsSource};
use crate::error::{ArgbindError, Result};
use crate::help::HelpDetail;
use crate::locale::{Catalog, English};
use crate::model::{Configurable, Schema};
use crate::resolve::sources::{resolve_environment, resolve_settings};
use crate::resolve::walker::walk;
use crate::resolve::{commit, extract, FieldKinds, Scope};

/// Configuration object an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Program,
    /// Index into the command list given to [`Cli::parse_commands`].
    Command(usize),
}

/// Result of interpreting a command line.
#[derive(Debug)]
pub enum Outcome {
    /// The target was fully bound and can run.
    Configured(Target),
    ShowHelp { target: Target, detail: HelpDetail },
    ShowVersion,
    ShowSettings,
    UnknownCommand(String),
    ParseError { target: Target, error: ArgbindError },
}

/// Binds configuration objects from settings, the environment and
/// command-line tokens, and renders their documentation.
pub struct Cli {
    program: String,
    version: String,
    namespace: String,
    pub(crate) settings: Box<dyn SettingsSource>,
    pub(crate) env: Box<dyn EnvSource>,
    pub(crate) catalog: Box<dyn Catalog>,
}

impl Cli {
    pub const DEFAULT_NAMESPACE: &'static str = "Cli";

    /// Engine with no persisted settings, the process environment and
    /// English text.
    pub fn new<P: Into<String>, V: Into<String>>(program: P, version: V) -> Self {
        Self {
            program: program.into(),
            version: version.into(),
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            settings: Box::new(Settings::new()),
            env: Box::new(ProcessEnv),
            catalog: Box::new(English),
        }
    }

    /// Prefix of every settings key.
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_settings<S: SettingsSource + 'static>(mut self, settings: S) -> Self {
        self.settings = Box::new(settings);
        self
    }

    pub fn with_env<E: EnvSource + 'static>(mut self, env: E) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn with_catalog<C: Catalog + 'static>(mut self, catalog: C) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub(crate) fn scope<'a>(&'a self, schema: &'a Schema) -> Scope<'a> {
        Scope::new(self.catalog.as_ref(), schema.command_name())
    }

    /// Bind a configuration object: settings, then the environment, then
    /// the command-line tokens. The first failure aborts.
    ///
    /// The required check after the token walk only considers values given
    /// on the command line.
    pub fn resolve<S: AsRef<str>>(&self, args: &[S], target: &mut dyn Configurable) -> Result<()> {
        let schema = target.schema();
        let scope = self.scope(schema);
        debug!(
            "Resolving {} with {} tokens",
            schema.command_name().unwrap_or(&self.program),
            args.len()
        );

        let mut descriptors = extract(schema, FieldKinds::FOR_PARSING);
        resolve_settings(&mut descriptors, self.settings.as_ref(), &self.namespace, &scope, true)?;
        resolve_environment(&mut descriptors, self.env.as_ref(), &scope, true)?;
        commit(target, &mut descriptors)?;

        let mut descriptors = extract(schema, FieldKinds::NAMED_OR_POSITIONAL);
        walk(args, &mut descriptors, &scope)?;
        commit(target, &mut descriptors)
    }

    /// Best-effort binding from settings (and optionally the environment)
    /// used before rendering documentation. Failures are logged.
    pub(crate) fn refresh(&self, target: &mut dyn Configurable, filter: FieldKinds, with_env: bool) {
        let schema = target.schema();
        let scope = self.scope(schema);
        let mut descriptors = extract(schema, filter);

        let mut result = resolve_settings(&mut descriptors, self.settings.as_ref(), &self.namespace, &scope, false);
        if with_env && result.is_ok() {
            result = resolve_environment(&mut descriptors, self.env.as_ref(), &scope, false);
        }
        if let Err(e) = result.and_then(|_| commit(target, &mut descriptors)) {
            warn!("Could not refresh current values: {}", e);
        }
    }

    fn reserved<S: AsRef<str>>(args: &[S], target: Target) -> Option<Outcome> {
        let [only] = args else {
            return None;
        };
        match only.as_ref() {
            token @ ("-h" | "--help") => Some(Outcome::ShowHelp {
                target,
                detail: HelpDetail::for_token(token),
            }),
            "-v" | "--version" => Some(Outcome::ShowVersion),
            "--print-app-settings" => Some(Outcome::ShowSettings),
            _ => None,
        }
    }

    /// Interpret the command line of a single-command program.
    pub fn parse<S: AsRef<str>>(&self, args: &[S], program: &mut dyn Configurable) -> Outcome {
        if let Some(outcome) = Self::reserved(args, Target::Program) {
            return outcome;
        }
        match self.resolve(args, program) {
            Ok(()) => Outcome::Configured(Target::Program),
            Err(error) => Outcome::ParseError {
                target: Target::Program,
                error,
            },
        }
    }

    /// Interpret `<command> [args...]` against a list of commands.
    ///
    /// Without arguments the default command is bound, or quick help is
    /// requested when there is none. `<command> -h|--help` requests help
    /// for that command.
    pub fn parse_commands<S: AsRef<str>>(&self, args: &[S], commands: &mut [&mut dyn Configurable]) -> Outcome {
        if let Some(outcome) = Self::reserved(args, Target::Program) {
            return outcome;
        }

        let Some((name, rest)) = args.split_first() else {
            let default = commands
                .iter()
                .position(|c| c.schema().is_default_command());
            return match default {
                Some(index) => self.bind_command(&[] as &[&str], commands, index),
                None => Outcome::ShowHelp {
                    target: Target::Program,
                    detail: HelpDetail::QUICK,
                },
            };
        };

        let name = name.as_ref();
        let Some(index) = commands
            .iter()
            .position(|c| c.schema().command_name() == Some(name))
        else {
            return Outcome::UnknownCommand(self.catalog.unknown_command(name));
        };

        if let Some(first) = rest.first().map(|s| s.as_ref()) {
            if first == "-h" || first == "--help" {
                return Outcome::ShowHelp {
                    target: Target::Command(index),
                    detail: HelpDetail::for_token(first),
                };
            }
        }
        self.bind_command(rest, commands, index)
    }

    fn bind_command<S: AsRef<str>>(&self, args: &[S], commands: &mut [&mut dyn Configurable], index: usize) -> Outcome {
        let target = Target::Command(index);
        match self.resolve(args, &mut *commands[index]) {
            Ok(()) => Outcome::Configured(target),
            Err(error) => Outcome::ParseError { target, error },
        }
    }
}
