// ABOUTME: Configuration types and parsing for stratus.yml.
// ABOUTME: Bundles service id, credential, and timing tunables for injection.

mod env_file;
mod env_value;
mod init;

pub use env_file::parse_env_file;
pub use env_value::EnvValue;
pub use init::init_config;

use crate::error::{Error, Result};
use crate::types::ServiceId;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "stratus.yml";
pub const CONFIG_FILENAME_ALT: &str = "stratus.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stratus/config.yml";

/// Full configuration for one service's orchestration.
///
/// Constructed explicitly and passed in wherever needed, so tests and tools
/// can run multiple independent instances with different tunables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service_id: ServiceId,

    pub api: ApiConfig,

    /// Public URL of the deployed service, used for health probes.
    /// Falls back to the URL reported by the service descriptor.
    #[serde(default)]
    pub service_url: Option<String>,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub health: HealthConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Default env file for `stratus sync`.
    #[serde(default)]
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,

    /// Bearer credential; usually indirect via `{ env: VAR }`.
    pub token: EnvValue,

    #[serde(default = "default_api_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
    /// How often to poll deploy status.
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Wall-clock budget for a deploy to reach a terminal state.
    #[serde(default = "default_max_wait", with = "humantime_serde")]
    pub max_wait: Duration,

    /// Pause between observed success and the post-flight health probe.
    #[serde(default = "default_settle_period", with = "humantime_serde")]
    pub settle_period: Duration,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            poll_interval: default_poll_interval(),
            max_wait: default_max_wait(),
            settle_period: default_settle_period(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            timeout: default_probe_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_monitor_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Consecutive failed observations before an alert fires.
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: default_monitor_interval(),
            alert_threshold: default_alert_threshold(),
        }
    }
}

fn default_api_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_max_wait() -> Duration {
    Duration::from_secs(600)
}

fn default_settle_period() -> Duration {
    Duration::from_secs(30)
}

fn default_probe_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_monitor_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_alert_threshold() -> u32 {
    5
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
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }
}
