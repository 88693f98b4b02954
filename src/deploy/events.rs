// ABOUTME: Deployment phases and the observer seam for progress reporting.
// ABOUTME: Keeps the orchestration core free of any particular output surface.

use crate::api::DeployStatus;
use crate::health::HealthResult;
use crate::types::DeployId;

/// Macro-phases of one deploy run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreFlight,
    Submit,
    Polling,
    PostFlight,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreFlight => write!(f, "pre-flight"),
            Self::Submit => write!(f, "submit"),
            Self::Polling => write!(f, "polling"),
            Self::PostFlight => write!(f, "post-flight"),
        }
    }
}

/// Receives orchestration progress. All methods default to no-ops so
/// subscribers implement only what they care about. Any CLI, dashboard, or
/// log shipper can sit behind this.
pub trait DeployObserver: Send + Sync {
    /// A new phase began.
    fn on_phase(&self, _phase: Phase) {}

    /// The polled deploy status changed (edge-triggered: fired once per
    /// transition, not once per observation).
    fn on_status_change(&self, _deploy: &DeployId, _status: DeployStatus) {}

    /// A health probe completed (pre- or post-flight; informational).
    fn on_health(&self, _phase: Phase, _result: &HealthResult) {}

    /// Something degraded without failing the run.
    fn on_warning(&self, _message: &str) {}
}

/// Observer that discards everything. Useful in tests and embedders that
/// only want the final result.
pub struct NullObserver;

impl DeployObserver for NullObserver {}

/// De-duplicates a stream of polled statuses into change events.
#[derive(Debug, Default)]
pub struct StatusTracker {
    last: Option<DeployStatus>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation. Returns `Some` only when the status differs
    /// from the previous observation (the first observation always counts).
    pub fn observe(&mut self, status: DeployStatus) -> Option<DeployStatus> {
        if self.last == Some(status) {
            None
        } else {
            self.last = Some(status);
            Some(status)
        }
    }

    /// The most recently observed status, if any.
    pub fn last(&self) -> Option<DeployStatus> {
        self.last
    }
}
