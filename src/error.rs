// ABOUTME: Application-wide error types for shipyard.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::deploy::{ClassifiedError, DeployError};
use crate::platform::ClientError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("platform client: {0}")]
    Client(#[from] ClientError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Rejected(#[from] ClassifiedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Machine-readable code: the rejection code for typed rejections, the
    /// platform's own code for faults that did not classify.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Rejected(err) => Some(err.code()),
            Error::Deploy(err) => err
                .fault()
                .map(|fault| fault.code.as_str())
                .filter(|code| !code.is_empty()),
            _ => None,
        }
    }
}


pub type Result<T> = std::result::Result<T, Error>;
