// ABOUTME: Configuration types and parsing for shipyard.yml.
// ABOUTME: Handles YAML parsing, env var interpolation, and building the creation request.

mod deserialize;
mod env_value;
mod init;

pub use env_value::{EnvValue, resolve_env_map};
pub use init::init_config;

use crate::deploy::{DEFAULT_MAX_REPAIR_CYCLES, RepairPolicy};
use crate::error::{Error, Result};
use crate::platform::{CreateArgs, CreationRequest, HttpPlatformClient, Routing};
use crate::types::ContextName;
use deserialize::deserialize_paths;
use nonempty::NonEmpty;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "shipyard.yml";
pub const CONFIG_FILENAME_ALT: &str = "shipyard.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".shipyard/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub context: ContextName,

    pub platform: PlatformConfig,

    #[serde(deserialize_with = "deserialize_paths")]
    pub paths: NonEmpty<PathBuf>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub env: HashMap<String, EnvValue>,

    #[serde(default)]
    pub build_env: HashMap<String, EnvValue>,

    #[serde(default)]
    pub meta: HashMap<String, String>,

    #[serde(default)]
    pub repair: RepairConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConfig {
    pub endpoint: String,

    #[serde(default)]
    pub token: Option<EnvValue>,

    #[serde(default)]
    pub team_id: Option<String>,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Request `*.domain` too when repairing a missing certificate.
    #[serde(default)]
    pub wildcard_certs: bool,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepairConfig {
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u32,
}

fn default_max_cycles() -> u32 {
    DEFAULT_MAX_REPAIR_CYCLES
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Build the creation request, resolving env values.
    ///
    /// `target` overrides the configured target when given.
    pub fn creation_request(&self, target: Option<&str>) -> Result<CreationRequest> {
        let args = CreateArgs {
            name: self.name.clone(),
            target: target.map(str::to_string).or_else(|| self.target.clone()),
            env: resolve_env_map(&self.env)?,
            build_env: resolve_env_map(&self.build_env)?,
            meta: self.meta.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            extra: Default::default(),
        };
        Ok(CreationRequest::new(self.paths.clone(), args))
    }

    pub fn routing(&self) -> Routing {
        let routing = Routing::new(self.context.clone());
        match &self.platform.team_id {
            Some(team) => routing.with_team_id(team),
            None => routing,
        }
    }

    pub fn repair_policy(&self) -> RepairPolicy {
        RepairPolicy {
            max_cycles: self.repair.max_cycles,
        }
    }

    /// Build the platform client from the `platform` section.
    pub fn platform_client(&self) -> Result<HttpPlatformClient> {
        let client =
            HttpPlatformClient::new(&self.platform.endpoint, self.platform.request_timeout)?;
        match &self.platform.token {
            Some(token) => Ok(client.with_token(token.resolve()?)),
            None => Ok(client),
        }
    }

    pub fn template() -> Self {
        Config {
            context: ContextName::new("my-team").expect("template context is valid"),
            platform: PlatformConfig {
                endpoint: "http://localhost:3000".to_string(),
                token: None,
                team_id: None,
                request_timeout: default_request_timeout(),
                wildcard_certs: false,
            },
            paths: NonEmpty::new(PathBuf::from(".")),
            name: None,
            target: None,
            env: HashMap::new(),
            build_env: HashMap::new(),
            meta: HashMap::new(),
            repair: RepairConfig::default(),
        }
    }
}
