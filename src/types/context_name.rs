// ABOUTME: Account/team context name used to route platform requests.
// ABOUTME: Rejects empty, oversized, or whitespace-containing slugs.

use serde::{Deserialize, Deserializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextNameError {
    #[error("context name cannot be empty")]
    Empty,

    #[error("context name exceeds maximum length of 100 characters")]
    TooLong,

    #[error("context name cannot contain whitespace")]
    ContainsWhitespace,

    #[error("invalid character in context name: '{0}'")]
    InvalidChar(char),
}

/// The account or team under which a deployment is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextName(String);

impl ContextName {
    pub fn new(value: &str) -> Result<Self, ContextNameError> {
        if value.is_empty() {
            return Err(ContextNameError::Empty);
        }

        if value.chars().count() > 100 {
            return Err(ContextNameError::TooLong);
        }

        for c in value.chars() {
            if c.is_whitespace() {
                return Err(ContextNameError::ContainsWhitespace);
            }
            if c.is_control() || c == '/' || c == '?' || c == '#' {
                return Err(ContextNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ContextName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ContextName::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_team_slug() {
        let name = ContextName::new("team-x").unwrap();
        assert_eq!(name.as_str(), "team-x");
        assert_eq!(name.to_string(), "team-x");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ContextName::new(""), Err(ContextNameError::Empty));
    }

    #[test]
    fn rejects_whitespace() {
        assert_eq!(
            ContextName::new("my team"),
            Err(ContextNameError::ContainsWhitespace)
        );
    }

    #[test]
    fn rejects_path_separators() {
        assert_eq!(
            ContextName::new("team/x"),
            Err(ContextNameError::InvalidChar('/'))
        );
    }
}
