//! Per-iteration variable store.
//!
//! The context is the shared key-value store a load-test driver threads through
//! request preparation. It is seeded once per iteration from the settings file
//! and from literal plugin parameters, then read (and occasionally written) by
//! the preparation pipeline. Each test iteration gets its own context; nothing
//! here is shared across iterations.

use crate::variables::VarError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered variable store for one test iteration.
///
/// Keys are unique and insertion order is preserved, so serialized contexts
/// and bodies built from them are deterministic. Lookups used for token
/// substitution are fail-fast: a missing key is an error, never an empty
/// string. Substitution itself never inserts keys; only seeding and email
/// generation write to the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    variables: IndexMap<String, String>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            variables: IndexMap::new(),
        }
    }

    /// Gets a variable value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Looks up a variable, failing if the key is absent.
    ///
    /// This is the substitution contract: malformed or incomplete context data
    /// must surface immediately rather than silently producing a broken
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `VarError::UndefinedVariable` if `key` is not in the store.
    pub fn lookup(&self, key: &str) -> Result<&str, VarError> {
        self.variables
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| VarError::UndefinedVariable(key.to_string()))
    }

    /// Sets a variable value, inserting or overwriting.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Checks if a variable exists.
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the variable names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Checks if the context holds no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
