//! Settings file loader.
//!
//! The pipeline seeds empty context entries from an external key/value
//! settings file read once per request preparation. The file is a flat JSON
//! object (`.preflight-settings.json` or `preflight.settings.json`) searched
//! for in the workspace directory and up to 3 parent directories. A missing
//! file is not an error: seeding is simply skipped.

use serde_json;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Settings key that seeds the email generator's application-name suffix.
pub const APPLICATION_NAME_KEY: &str = "ApplicationName";

/// Supported settings file names in order of preference
const SETTINGS_FILE_NAMES: &[&str] = &[".preflight-settings.json", "preflight.settings.json"];

/// Maximum number of parent directories to search
const MAX_PARENT_SEARCH_DEPTH: usize = 3;

/// Errors that can occur during settings loading
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Failed to parse JSON content
    ParseError(String),

    /// Invalid format or structure in the settings file
    InvalidFormat(String),

    /// IO error occurred while reading file
    IoError(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::ParseError(msg) => write!(f, "Failed to parse settings file: {}", msg),
            SettingsError::InvalidFormat(msg) => write!(f, "Invalid settings format: {}", msg),
            SettingsError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        SettingsError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::ParseError(err.to_string())
    }
}

/// Key/value settings used to seed the context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    values: HashMap<String, String>,
}

impl AppSettings {
    /// Creates an empty settings collection.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Gets a setting value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Sets a value, inserting or overwriting.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Checks if a key is defined.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The configured application name, or `None` when the key is absent.
    pub fn application_name(&self) -> Option<&str> {
        self.get(APPLICATION_NAME_KEY)
    }

    /// Returns the number of settings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if no settings are defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AppSettings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Loads settings from the workspace.
///
/// Searches for a settings file starting from `workspace_path` and traversing
/// up to 3 parent directories. Returns empty settings if no file is found
/// (graceful fallback: an absent settings source means seeding is skipped,
/// not that the request fails).
///
/// # Errors
///
/// Returns `SettingsError` only when a file exists but cannot be read or
/// parsed.
pub fn load_settings(workspace_path: &Path) -> Result<AppSettings, SettingsError> {
    let settings_file = match find_settings_file(workspace_path) {
        Some(path) => path,
        None => return Ok(AppSettings::new()),
    };

    let content = fs::read_to_string(&settings_file)?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;

    parse_settings(&raw)
}

/// Finds the settings file by searching workspace and parent directories
fn find_settings_file(workspace_path: &Path) -> Option<PathBuf> {
    let mut current_path = workspace_path.to_path_buf();

    for _ in 0..=MAX_PARENT_SEARCH_DEPTH {
        for filename in SETTINGS_FILE_NAMES {
            let candidate = current_path.join(filename);
            if candidate.exists() && candidate.is_file() {
                return Some(candidate);
            }
        }

        match current_path.parent() {
            Some(parent) => current_path = parent.to_path_buf(),
            None => break, // Reached filesystem root
        }
    }

    None
}

/// Parses the raw JSON object into a flat settings map.
///
/// Scalar values are coerced to strings (numbers and booleans via their
/// display form, null to the empty string); nested objects or arrays are
/// rejected.
fn parse_settings(raw: &serde_json::Value) -> Result<AppSettings, SettingsError> {
    let obj = raw
        .as_object()
        .ok_or_else(|| SettingsError::InvalidFormat("Root must be a JSON object".to_string()))?;

    let mut settings = AppSettings::new();

    for (key, val) in obj.iter() {
        let value_str = match val {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => String::new(),
            _ => {
                return Err(SettingsError::InvalidFormat(format!(
                    "Setting '{}' has invalid type (must be string, number, or boolean)",
                    key
                )));
            }
        };

        settings.set(key.clone(), value_str);
    }

    Ok(settings)
}
