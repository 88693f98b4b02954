// ABOUTME: Error types for deployment orchestration.
// ABOUTME: Every fatal variant names the phase and last observed remote state.

use std::time::Duration;

use crate::api::{ClientError, DeployStatus};
use crate::types::DeployId;

use super::events::Phase;

/// Errors that end a deploy run.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A pre-flight check failed. Never retried automatically; an operator
    /// has to resolve the condition first.
    #[error("pre-flight check failed: {reason}")]
    Precondition { reason: String },

    /// The remote build or update ended in a terminal failure state.
    #[error("deploy {id} ended as {status}")]
    Failed { id: DeployId, status: DeployStatus },

    /// The polling budget ran out before a terminal state was observed.
    /// Ambiguous: the deploy may still complete later on the platform side.
    #[error(
        "deploy {id} did not reach a terminal state within {}s (last observed: {last_status})",
        waited.as_secs()
    )]
    Timeout {
        id: DeployId,
        waited: Duration,
        last_status: DeployStatus,
    },

    /// A control-plane request failed fatally during `phase`.
    #[error("{phase} request failed: {source}")]
    Client { phase: Phase, source: ClientError },
}

impl DeployError {
    /// The phase the run died in.
    pub fn phase(&self) -> Phase {
        match self {
            DeployError::Precondition { .. } => Phase::PreFlight,
            DeployError::Failed { .. } | DeployError::Timeout { .. } => Phase::Polling,
            DeployError::Client { phase, .. } => *phase,
        }
    }

    /// The last deploy status observed before the run ended, if any.
    pub fn last_status(&self) -> Option<DeployStatus> {
        match self {
            DeployError::Failed { status, .. } => Some(*status),
            DeployError::Timeout { last_status, .. } => Some(*last_status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_know_their_phase() {
        let precondition = DeployError::Precondition {
            reason: "service is suspended".into(),
        };
        assert_eq!(precondition.phase(), Phase::PreFlight);

        let failed = DeployError::Failed {
            id: DeployId::new("dep-1"),
            status: DeployStatus::BuildFailed,
        };
        assert_eq!(failed.phase(), Phase::Polling);
        assert_eq!(failed.last_status(), Some(DeployStatus::BuildFailed));

        let client = DeployError::Client {
            phase: Phase::Submit,
            source: ClientError::Api {
                status: 500,
                body: String::new(),
            },
        };
        assert_eq!(client.phase(), Phase::Submit);
        assert_eq!(client.last_status(), None);
    }

    #[test]
    fn timeout_message_names_last_status() {
        let timeout = DeployError::Timeout {
            id: DeployId::new("dep-1"),
            waited: Duration::from_secs(600),
            last_status: DeployStatus::BuildInProgress,
        };
        let message = timeout.to_string();
        assert!(message.contains("600s"));
        assert!(message.contains("build_in_progress"));
    }
}
