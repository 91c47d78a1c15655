// ABOUTME: Config values that are either literal or read from the environment.
// ABOUTME: Used for the platform token and for env/build_env passed to deployments.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// A literal string, or `{ env: NAME, default: ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    /// Resolve against the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnvVar` when the variable is unset and no
    /// default was given.
    pub fn resolve(&self) -> Result<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        let (var, default) = match self {
            EnvValue::Literal(s) => return Ok(s.clone()),
            EnvValue::FromEnv { var, default } => (var, default),
        };
        lookup(var)
            .or_else(|| default.clone())
            .ok_or_else(|| Error::MissingEnvVar(var.clone()))
    }
}

/// Resolve every value into a map ordered by key, so the encoded request
/// is the same on every call.
pub fn resolve_env_map(map: &HashMap<String, EnvValue>) -> Result<BTreeMap<String, String>> {
    let mut resolved = BTreeMap::new();
    for (key, value) in map {
        resolved.insert(key.clone(), value.resolve()?);
    }
    Ok(resolved)
}
