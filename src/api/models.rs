// ABOUTME: Wire types for the hosting platform's control-plane API.
// ABOUTME: Service descriptors, deploys, env vars, and their status enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DeployId, ServiceId};

/// Lifecycle state of a service, as reported by the control plane.
///
/// Distinct from [`DeployStatus`]: the two are retrieved independently and
/// may be transiently inconsistent. Deploy completion decisions must key off
/// deploy status, never service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Available,
    Building,
    Updating,
    Suspended,
    DeployFailed,
    BuildFailed,
    PreDeployInProgress,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Building => write!(f, "building"),
            Self::Updating => write!(f, "updating"),
            Self::Suspended => write!(f, "suspended"),
            Self::DeployFailed => write!(f, "deploy_failed"),
            Self::BuildFailed => write!(f, "build_failed"),
            Self::PreDeployInProgress => write!(f, "pre_deploy_in_progress"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// What kind of workload the service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    WebService,
    BackgroundWorker,
    CronJob,
    StaticSite,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WebService => write!(f, "web_service"),
            Self::BackgroundWorker => write!(f, "background_worker"),
            Self::CronJob => write!(f, "cron_job"),
            Self::StaticSite => write!(f, "static_site"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Point-in-time snapshot of a service. Fetched on demand, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ServiceKind,
    pub state: ServiceState,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status of a single deploy, observed via polling.
///
/// The remote sequence on success is created -> build_in_progress ->
/// build_successful -> update_in_progress -> live. Any pre-live state can
/// jump to build_failed or canceled. Deactivated only happens through
/// external action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStatus {
    Created,
    BuildInProgress,
    BuildSuccessful,
    UpdateInProgress,
    Live,
    Deactivated,
    BuildFailed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl DeployStatus {
    /// Whether no further automatic transition will occur.
    ///
    /// The single source of truth for the terminal set; call sites must not
    /// re-derive this from string comparisons.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Live | Self::BuildFailed | Self::Canceled | Self::Deactivated
        )
    }

    /// Whether this is a terminal failure (as opposed to terminal success).
    pub fn is_failure(self) -> bool {
        matches!(self, Self::BuildFailed | Self::Canceled)
    }
}

impl std::fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::BuildInProgress => write!(f, "build_in_progress"),
            Self::BuildSuccessful => write!(f, "build_successful"),
            Self::UpdateInProgress => write!(f, "update_in_progress"),
            Self::Live => write!(f, "live"),
            Self::Deactivated => write!(f, "deactivated"),
            Self::BuildFailed => write!(f, "build_failed"),
            Self::Canceled => write!(f, "canceled"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Commit metadata attached to a deploy, when the platform knows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
}

/// A single deploy of a service.
///
/// State transitions happen exclusively on the remote side; this client only
/// observes them. The id is stable for the lifetime of the deploy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deploy {
    pub id: DeployId,
    pub service_id: ServiceId,
    pub status: DeployStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub commit: Option<CommitInfo>,
}

/// An environment variable as stored on the control plane.
/// Keys are unique within a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}
