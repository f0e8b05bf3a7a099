use thiserror::Error;

/// Main error type for argbind operations
#[derive(Debug, Error)]
pub enum ArgbindError {
    /// A user-facing failure while binding a value. `command` names the
    /// owning configuration object, `None` being the root program.
    #[error("{message}")]
    ArgumentParse {
        message: String,
        command: Option<String>,
        #[source]
        source: Option<Box<ArgbindError>>,
    },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0}")]
    UserInterrupted(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Date/time error: {0}")]
    DateTimeError(#[from] chrono::ParseError),
}

impl ArgbindError {
    pub fn parse<S: Into<String>>(msg: S, command: Option<&str>) -> Self {
        Self::ArgumentParse {
            message: msg.into(),
            command: command.map(str::to_string),
            source: None,
        }
    }

    pub fn parse_caused<S: Into<String>>(msg: S, command: Option<&str>, cause: ArgbindError) -> Self {
        Self::ArgumentParse {
            message: msg.into(),
            command: command.map(str::to_string),
            source: Some(Box::new(cause)),
        }
    }

    pub fn unknown_command<S: Into<String>>(name: S) -> Self {
        Self::UnknownCommand(name.into())
    }

    pub fn interrupted<S: Into<String>>(msg: S) -> Self {
        Self::UserInterrupted(msg.into())
    }

    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        Self::Precondition(msg.into())
    }

    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::Unsupported(msg.into())
    }

    pub fn invalid_value<S: Into<String>>(msg: S) -> Self {
        Self::InvalidValue(msg.into())
    }

    pub fn settings<S: Into<String>>(msg: S) -> Self {
        Self::SettingsError(msg.into())
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ArgumentParse { .. })
    }

    pub fn is_interrupt(&self) -> bool {
        matches!(self, Self::UserInterrupted(_))
    }

    /// Command owning a parse error; `None` for the root program or for
    /// errors that are not parse errors.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::ArgumentParse { command, .. } => command.as_deref(),
            _ => None,
        }
    }

    /// Message of the error followed by the messages of its causes.
    pub fn detailed(&self) -> String {
        let mut text = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(inner) = cause {
            text.push_str(": ");
            text.push_str(&inner.to_string());
            cause = inner.source();
        }
        text
    }
}

/// Result type alias for argbind operations
pub type Result<T> = std::result::Result<T, ArgbindError>;
