// ABOUTME: Application-wide error types for stratus.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::api::ClientError;
use crate::deploy::DeployError;
use crate::reconcile::SyncError;

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

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("control plane error: {0}")]
    Client(#[from] ClientError),

    #[error("deploy failed: {0}")]
    Deploy(#[from] DeployError),

    #[error("environment sync failed: {0}")]
    Sync(#[from] SyncError),
}

pub type Result<T> = std::result::Result<T, Error>;
