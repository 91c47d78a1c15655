// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates shipyard.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::ContextName;

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, context: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(c) = context {
        config.context = ContextName::new(c).map_err(|e| Error::InvalidConfig(e.to_string()))?;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"context: {}
platform:
  endpoint: {}
  token:
    env: SHIPYARD_TOKEN
  # team_id: team_123
  # request_timeout: 30s
paths:
  - {}
# name: my-app
# target: production
# repair:
#   max_cycles: {}
"#,
        config.context,
        config.platform.endpoint,
        config.paths.first().display(),
        config.repair.max_cycles,
    )
}
