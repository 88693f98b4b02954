// ABOUTME: Liveness probing of a deployed service's public /health endpoint.
// ABOUTME: Classifies each probe as healthy, unhealthy, or transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

/// Default timeout for a single health probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a single health probe. Produced fresh on every check,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HealthResult {
    /// Endpoint answered 2xx.
    Healthy {
        #[serde(skip_serializing_if = "Option::is_none")]
        response: Option<String>,
    },
    /// Endpoint answered, but not 2xx.
    Unhealthy { code: u16 },
    /// The probe itself failed (timeout, DNS, refused connection).
    Error { message: String },
}

impl HealthResult {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthResult::Healthy { .. })
    }
}

impl std::fmt::Display for HealthResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy { .. } => write!(f, "healthy"),
            Self::Unhealthy { code } => write!(f, "unhealthy (HTTP {code})"),
            Self::Error { message } => write!(f, "error ({message})"),
        }
    }
}

/// Issues a single liveness probe. Never retries; callers own the cadence.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self, service_url: &str) -> HealthResult;
}

/// HTTP prober hitting `GET <service_url>/health` with a bounded timeout.
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// # Errors
    ///
    /// Returns the underlying builder error if the HTTP client cannot be
    /// constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HealthProbe for HttpProber {
    async fn check(&self, service_url: &str) -> HealthResult {
        let url = format!("{}/health", service_url.trim_end_matches('/'));
        debug!(url = %url, "health probe");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                return HealthResult::Error {
                    message: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status.is_success() {
            // Body format is opaque; carry it through for display only.
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            HealthResult::Healthy { response: body }
        } else {
            HealthResult::Unhealthy {
                code: status.as_u16(),
            }
        }
    }
}
