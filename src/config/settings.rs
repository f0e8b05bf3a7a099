//! Persisted key/value settings store.
//!
//! Keys follow `Namespace.<command-or-*>.<argument>[.<index>]` or
//! `Namespace.<argument>` for the root program. Stores can be loaded from
//! TOML, JSON or the generated `<appSettings>` XML template.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ArgbindError, Result};
use crate::utils::xml::unescape_xml;

/// Read-only lookup into persisted settings.
pub trait SettingsSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl SettingsSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Flat key/value store; serializes as a plain string map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            path: None,
        }
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// File the store was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load a settings file, choosing the format by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        debug!("Loading settings from {}", path.display());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let mut settings = match extension.as_deref() {
            Some("toml") => Self::parse_toml(&contents)?,
            Some("json") => Self::parse_json(&contents)?,
            Some("config") | Some("xml") => Self::parse_app_settings(&contents)?,
            // Try to parse as TOML first, then JSON as fallback
            _ => match Self::parse_toml(&contents) {
                Ok(settings) => settings,
                Err(_) => Self::parse_json(&contents)?,
            },
        };
        settings.path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Load a settings file, or return an empty store when it does not exist.
    pub fn load_if_exists<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No settings file at {}", path.display());
            Ok(Self::new())
        }
    }

    /// Nested tables are flattened with `.`; arrays become `key.1`, `key.2`, ...
    pub fn parse_toml(text: &str) -> Result<Self> {
        let table: toml::Table = text.parse()?;
        let mut settings = Self::new();
        for (key, value) in table {
            flatten_toml(&mut settings.values, key, value);
        }
        Ok(settings)
    }

    /// Nested objects are flattened with `.`; arrays become `key.1`, `key.2`, ...
    pub fn parse_json(text: &str) -> Result<Self> {
        let root: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Object(map) = root else {
            return Err(ArgbindError::settings("JSON settings must be an object"));
        };
        let mut settings = Self::new();
        for (key, value) in map {
            flatten_json(&mut settings.values, key, value);
        }
        Ok(settings)
    }

    /// Parse `<add key=".." value=".."/>` entries, ignoring comments.
    pub fn parse_app_settings(text: &str) -> Result<Self> {
        let comments = Regex::new(r"(?s)<!--.*?-->")?;
        let entry = Regex::new(r#"<add\s+key\s*=\s*"([^"]*)"\s+value\s*=\s*"([^"]*)"\s*/>"#)?;

        let stripped = comments.replace_all(text, "");
        let mut settings = Self::new();
        for captures in entry.captures_iter(&stripped) {
            settings.insert(unescape_xml(&captures[1]), unescape_xml(&captures[2]));
        }
        Ok(settings)
    }

    /// Default settings file location for a program.
    pub fn default_path(program: &str) -> Result<PathBuf> {
        // Use XDG Base Directory specification on Linux and macOS
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            use std::env;
            let config_dir = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
                PathBuf::from(xdg_config_home)
            } else {
                let home_dir = env::var("HOME")
                    .map_err(|_| ArgbindError::settings("HOME environment variable not set"))?;
                PathBuf::from(home_dir).join(".config")
            };
            Ok(config_dir.join(program).join("settings.toml"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| ArgbindError::settings("Unable to determine config directory"))?;
            Ok(config_dir.join(program).join("settings.toml"))
        }
    }
}

impl SettingsSource for Settings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

fn flatten_toml(out: &mut BTreeMap<String, String>, key: String, value: toml::Value) {
    match value {
        toml::Value::String(s) => {
            out.insert(key, s);
        }
        toml::Value::Table(table) => {
            for (child, value) in table {
                flatten_toml(out, format!("{}.{}", key, child), value);
            }
        }
        toml::Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                flatten_toml(out, format!("{}.{}", key, i + 1), item);
            }
        }
        other => {
            out.insert(key, other.to_string());
        }
    }
}

fn flatten_json(out: &mut BTreeMap<String, String>, key: String, value: serde_json::Value) {
    match value {
        serde_json::Value::Null => {}
        serde_json::Value::String(s) => {
            out.insert(key, s);
        }
        serde_json::Value::Object(map) => {
            for (child, value) in map {
                flatten_json(out, format!("{}.{}", key, child), value);
            }
        }
        serde_json::Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                flatten_json(out, format!("{}.{}", key, i + 1), item);
            }
        }
        other => {
            out.insert(key, other.to_string());
        }
    }
}
