// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates stratus.yml template files.

use std::path::Path;

use crate::error::{Error, Result};

use super::CONFIG_FILENAME;

pub fn init_config(dir: &Path, service_id: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(service_id.unwrap_or("srv-your-service-id"));
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(service_id: &str) -> String {
    format!(
        r#"service_id: {service_id}
api:
  base_url: https://api.hosting.example.com/v1
  # Read the bearer token from the environment; never commit it.
  token:
    env: STRATUS_API_TOKEN
  # timeout: 30s

# Public URL used for health probes. Defaults to the URL the
# control plane reports for the service.
# service_url: https://my-app.example.com

# deploy:
#   poll_interval: 10s
#   max_wait: 10m
#   settle_period: 30s

# monitor:
#   interval: 60s
#   alert_threshold: 5

# Local source of truth for `stratus sync`.
# env_file: .env.production
"#
    )
}
