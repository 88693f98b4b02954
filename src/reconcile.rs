// ABOUTME: Environment variable reconciliation between a local env file
// ABOUTME: and the control plane. Additive/overwrite only, never deletes.

use std::collections::{BTreeMap, HashSet};

use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ClientError, ControlPlaneApi, EnvVar};
use crate::types::ServiceId;

/// Which keys converged, split by the operation that was issued.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
}

impl SyncReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }

    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{created: {}, updated: {}}}",
            self.created.len(),
            self.updated.len()
        )
    }
}

/// A single key that failed to converge.
#[derive(Debug)]
pub struct KeyFailure {
    pub key: String,
    pub error: ClientError,
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// Listing the remote set failed; no keys were attempted.
    #[error("failed to list remote environment: {source}")]
    Fetch { source: ClientError },

    /// Some keys failed after the whole batch was attempted.
    /// `report` names the keys that did converge.
    #[error("{} key(s) failed to sync ({} succeeded: {report})", failures.len(), report.created_count() + report.updated_count())]
    Partial {
        report: SyncReport,
        failures: Vec<KeyFailure>,
    },
}

enum Op {
    Create,
    Update,
}

/// Converge the remote environment toward the local set.
///
/// Local is authoritative: every local key present remotely is updated,
/// every local key absent remotely is created. Remote-only keys are left
/// alone; deletion is a deliberate non-feature of this path.
///
/// Per-key calls are independent and issued concurrently, then joined. A
/// failing key never aborts the rest of the batch; the error carries which
/// keys did succeed.
///
/// Running `sync` twice with the same local set is idempotent: the second
/// run reports zero creates (keys are overwritten in place, never
/// duplicated).
pub async fn sync<C: ControlPlaneApi>(
    api: &C,
    service: &ServiceId,
    local: &BTreeMap<String, String>,
) -> Result<SyncReport, SyncError> {
    let remote = api
        .list_env_vars(service)
        .await
        .map_err(|source| SyncError::Fetch { source })?;
    let remote_keys: HashSet<&str> = remote.iter().map(|v| v.key.as_str()).collect();

    debug!(
        local = local.len(),
        remote = remote.len(),
        "reconciling environment"
    );

    let ops = local.iter().map(|(key, value)| {
        let var = EnvVar {
            key: key.clone(),
            value: value.clone(),
        };
        let op = if remote_keys.contains(key.as_str()) {
            Op::Update
        } else {
            Op::Create
        };
        async move {
            let result = match op {
                Op::Create => api.create_env_var(service, &var).await,
                Op::Update => api.update_env_var(service, &var).await,
            };
            (var.key, op, result.map(|_| ()))
        }
    });

    let mut report = SyncReport::default();
    let mut failures = Vec::new();

    for (key, op, result) in join_all(ops).await {
        match (result, op) {
            (Ok(()), Op::Create) => report.created.push(key),
            (Ok(()), Op::Update) => report.updated.push(key),
            (Err(error), _) => failures.push(KeyFailure { key, error }),
        }
    }

    if failures.is_empty() {
        info!(%report, "environment in sync");
        Ok(report)
    } else {
        Err(SyncError::Partial { report, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_displays_counts() {
        let report = SyncReport {
            created: vec!["A".into()],
            updated: vec!["B".into(), "C".into()],
        };
        assert_eq!(report.to_string(), "{created: 1, updated: 2}");
        assert_eq!(report.created_count(), 1);
        assert_eq!(report.updated_count(), 2);
    }

    #[test]
    fn partial_error_names_progress() {
        let err = SyncError::Partial {
            report: SyncReport {
                created: vec![],
                updated: vec!["A".into(), "C".into()],
            },
            failures: vec![KeyFailure {
                key: "B".into(),
                error: ClientError::Api {
                    status: 500,
                    body: "boom".into(),
                },
            }],
        };
        let message = err.to_string();
        assert!(message.contains("1 key(s) failed"));
        assert!(message.contains("2 succeeded"));
    }
}
