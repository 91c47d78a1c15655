// ABOUTME: Creation request, routing context, and records returned by the platform.
// ABOUTME: The request is immutable and encodes to the same bytes on every attempt.

use crate::types::{CertificateId, ContextName, DeploymentId};
use chrono::{DateTime, Utc};
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Build arguments passed through to the platform untouched.
///
/// Maps are ordered so the encoded body is stable across retries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub build_env: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,

    /// Any additional fields, flattened into the request body.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Everything needed to create one deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationRequest {
    paths: NonEmpty<PathBuf>,
    args: CreateArgs,
}

#[derive(Serialize)]
struct CreationBody<'a> {
    paths: Vec<&'a Path>,
    #[serde(flatten)]
    args: &'a CreateArgs,
}

impl CreationRequest {
    pub fn new(paths: NonEmpty<PathBuf>, args: CreateArgs) -> Self {
        Self { paths, args }
    }

    pub fn paths(&self) -> &NonEmpty<PathBuf> {
        &self.paths
    }

    pub fn args(&self) -> &CreateArgs {
        &self.args
    }

    /// Encode the JSON request body sent to the platform.
    ///
    /// # Errors
    ///
    /// Fails when a path is not valid UTF-8; paths are never rewritten.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        let body = CreationBody {
            paths: self.paths.iter().map(PathBuf::as_path).collect(),
            args: &self.args,
        };
        serde_json::to_vec(&body)
    }
}

/// Which account/session a request is made under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    pub context: ContextName,
    pub team_id: Option<String>,
}

impl Routing {
    pub fn new(context: ContextName) -> Self {
        Self {
            context,
            team_id: None,
        }
    }

    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }
}

/// A created deployment, as returned by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub id: DeploymentId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_state: Option<String>,

    /// Creation time in milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,

    /// Remaining fields the platform returned.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl DeploymentRecord {
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(DateTime::from_timestamp_millis)
    }
}

/// An issued certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(alias = "uid")]
    pub id: CertificateId,

    #[serde(default)]
    pub cns: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}
