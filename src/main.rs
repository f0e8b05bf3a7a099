//! argbind-demo - message relay front end
//!
//! Shows a configuration object bound from the settings file, the
//! environment and the command line, with help and settings output.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use argbind::{
    ArgsView, Cli, Configurable, EnumType, FieldKinds, FieldSpec, HelpDetail, Outcome, Result, Schema,
    Settings, StdConsole, Value, ValueType,
};

const PROGRAM: &str = "argbind-demo";

/// Exit code for command lines that fail to parse.
const EXIT_USAGE: i32 = 2;

const PROTOCOL: EnumType = EnumType::new("Protocol", &["OpenWire", "Stomp", "Amqp"]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Protocol {
    OpenWire,
    Stomp,
    Amqp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::OpenWire => "OpenWire",
            Protocol::Stomp => "Stomp",
            Protocol::Amqp => "Amqp",
        };
        f.write_str(name)
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "OpenWire" => Ok(Protocol::OpenWire),
            "Stomp" => Ok(Protocol::Stomp),
            "Amqp" => Ok(Protocol::Amqp),
            other => Err(format!("unknown protocol {}", other)),
        }
    }
}

struct Relay {
    tasks: i64,
    protocol: Protocol,
    broker_uri: String,
    user_name: String,
    user_password: Option<String>,
    source: String,
    destinations: Vec<String>,
    verbose: bool,
}

impl Default for Relay {
    fn default() -> Self {
        Self {
            tasks: 8,
            protocol: Protocol::OpenWire,
            broker_uri: String::new(),
            user_name: String::new(),
            user_password: None,
            source: String::new(),
            destinations: Vec::new(),
            verbose: false,
        }
    }
}

impl Configurable for Relay {
    fn schema(&self) -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::program()
                .doc("[[program]] [[version]] receives messages from the source queue and replays them to the destination queues")
                .generate_sample()
                .field(
                    FieldSpec::named("tasks", ValueType::INTEGER)
                        .short('t')
                        .range(1, 128)
                        .sample("8")
                        .doc("Number of concurrent consumers"),
                )
                .field(
                    FieldSpec::named("protocol", ValueType::enumeration(PROTOCOL))
                        .sample("OpenWire")
                        .persisted(),
                )
                .field(
                    FieldSpec::named("broker_uri", ValueType::STRING)
                        .short('b')
                        .pattern_ignore_case("^(tcp|ssl|amqp)://")
                        .sample("ssl://10.0.0.4:61617")
                        .required(),
                )
                .field(
                    FieldSpec::named("user_name", ValueType::STRING)
                        .sample("main")
                        .interactive("User name", true),
                )
                .field(
                    FieldSpec::named("user_password", ValueType::STRING)
                        .secret()
                        .env_var("USER_PASSWORD")
                        .interactive("Password", false),
                )
                .field(
                    FieldSpec::positional("source", ValueType::STRING)
                        .sample("ORDERS.IN")
                        .doc("Queue to consume from"),
                )
                .field(
                    FieldSpec::positional("destinations", ValueType::STRINGS)
                        .rest_of_arguments()
                        .sample("ORDERS.OUT,ORDERS.AUDIT"),
                )
                .field(FieldSpec::named("verbose", ValueType::BOOLEAN).short('v'))
        })
    }

    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "tasks" => Some(Value::from(self.tasks)),
            "protocol" => Some(Value::enumeration(self.protocol)),
            "broker_uri" => Some(Value::from(self.broker_uri.as_str())),
            "user_name" => Some(Value::from(self.user_name.as_str())),
            "user_password" => self.user_password.clone().map(Value::from),
            "source" => Some(Value::from(self.source.as_str())),
            "destinations" => Some(Value::from(self.destinations.clone())),
            "verbose" => Some(Value::from(self.verbose)),
            _ => None,
        }
    }

    fn apply(&mut self, field: &str, value: Value) -> Result<()> {
        match field {
            "tasks" => self.tasks = value.try_into()?,
            "protocol" => self.protocol = value.parse_enum()?,
            "broker_uri" => self.broker_uri = value.try_into()?,
            "user_name" => self.user_name = value.try_into()?,
            "user_password" => self.user_password = Some(value.try_into()?),
            "source" => self.source = value.try_into()?,
            "destinations" => self.destinations = value.try_into()?,
            "verbose" => self.verbose = value.try_into()?,
            _ => {}
        }
        Ok(())
    }
}

fn main() {
    // Initialize logging
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Error: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns the process exit code.
fn run(args: &[String]) -> anyhow::Result<i32> {
    let settings_path = Settings::default_path(PROGRAM)?;
    let settings = Settings::load_if_exists(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;
    info!("Loaded {} settings", settings.len());

    let cli = Cli::new(PROGRAM, env!("VERSION_WITH_GIT")).with_settings(settings);
    let mut relay = Relay::default();

    match cli.parse(args, &mut relay) {
        Outcome::Configured(_) => exec(&cli, &mut relay)?,
        Outcome::ShowVersion => print!("{}", cli.render_version()),
        Outcome::ShowSettings => print!("{}", cli.render_settings(&mut relay, &mut [])),
        Outcome::ShowHelp { detail, .. } => {
            print!("{}", cli.render_command_line(args));
            print!("{}", cli.render_usage(&mut relay, detail));
        }
        Outcome::UnknownCommand(message) => {
            println!("{}", message);
            print!("{}", cli.render_usage(&mut relay, HelpDetail::QUICK));
        }
        Outcome::ParseError { error, .. } => {
            println!("{}", error.detailed());
            print!("{}", cli.render_command_line(args));
            print!("{}", cli.render_usage(&mut relay, HelpDetail::QUICK));
            return Ok(EXIT_USAGE);
        }
    }
    Ok(0)
}

fn exec(cli: &Cli, relay: &mut Relay) -> anyhow::Result<()> {
    let mut console = StdConsole::with_catalog(cli.catalog());
    if relay.user_name.is_empty() {
        cli.ask(&mut console, relay, "user_name")?;
    }
    if relay.user_password.is_none() {
        cli.ask(&mut console, relay, "user_password")?;
    }

    print!("{}", cli.render_args(&*relay, ArgsView::ALL, FieldKinds::ALL));
    cli.confirm_continue(&mut console)?;

    info!(
        "Relaying {} to {} destination(s) over {} with {} tasks",
        relay.source,
        relay.destinations.len(),
        relay.protocol,
        relay.tasks
    );
    if relay.verbose {
        for destination in &relay.destinations {
            println!("{} -> {} via {}", relay.source, destination, relay.broker_uri);
        }
    }
    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "argbind=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_parse_error_returns_usage_code() {
        assert_eq!(run(&args(&["--no-such-option", "x"])).unwrap(), EXIT_USAGE);
        assert_eq!(run(&args(&["-%"])).unwrap(), EXIT_USAGE);
    }

    #[test]
    fn test_version_returns_success() {
        assert_eq!(run(&args(&["--version"])).unwrap(), 0);
    }
}
