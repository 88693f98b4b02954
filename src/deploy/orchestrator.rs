// ABOUTME: The deploy state machine: pre-flight, submit, poll, post-flight.
// ABOUTME: Polls the control plane to a terminal state under a wall-clock budget.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::api::{
    ClientError, ControlPlaneApi, Deploy, DeployStatus, ServiceDescriptor, ServiceState,
};
use crate::config::DeployConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::health::HealthProbe;
use crate::types::ServiceId;

use super::error::DeployError;
use super::events::{DeployObserver, Phase, StatusTracker};
use super::rollback::{ROLLBACK_HISTORY_WINDOW, previous_live};

/// Drives one service's deploys against the control plane.
///
/// All state lives on the remote side; the orchestrator only observes it.
/// Construct one per service with explicit config so tests can run many
/// independent instances with their own tunables.
pub struct Orchestrator<C, P> {
    api: C,
    prober: P,
    service_id: ServiceId,
    service_url: Option<String>,
    tunables: DeployConfig,
}

impl<C: ControlPlaneApi, P: HealthProbe> Orchestrator<C, P> {
    pub fn new(
        api: C,
        prober: P,
        service_id: ServiceId,
        service_url: Option<String>,
        tunables: DeployConfig,
    ) -> Self {
        Self {
            api,
            prober,
            service_id,
            service_url,
            tunables,
        }
    }

    /// Run a full deploy: pre-flight checks, submit, poll to terminal state,
    /// post-flight verification.
    ///
    /// Post-flight degradations land in `diagnostics` as warnings; by the
    /// time they can occur the platform already considers the deploy
    /// successful.
    ///
    /// # Errors
    ///
    /// `Precondition` if pre-flight checks fail (no deploy is submitted),
    /// `Client` if submit or a pre-flight read fails, `Failed` if the deploy
    /// reaches a terminal failure state, `Timeout` if the polling budget runs
    /// out first.
    pub async fn deploy(
        &self,
        observer: &dyn DeployObserver,
        diagnostics: &mut Diagnostics,
    ) -> Result<Deploy, DeployError> {
        let descriptor = self.preflight(observer).await?;
        let submitted = self.submit(observer).await?;
        let live = self.poll(submitted, observer).await?;
        self.postflight(&descriptor, observer, diagnostics).await;
        Ok(live)
    }

    /// Report the deploy a rollback would target, from the last
    /// [`ROLLBACK_HISTORY_WINDOW`] deploys. `Ok(None)` means there is no
    /// previous live deploy to return to; that is an answer, not an error.
    ///
    /// # Errors
    ///
    /// Returns the underlying client error if history cannot be fetched.
    pub async fn rollback_target(&self) -> Result<Option<Deploy>, ClientError> {
        let history = self
            .api
            .list_deploys(&self.service_id, ROLLBACK_HISTORY_WINDOW)
            .await?;
        Ok(previous_live(&history).cloned())
    }

    async fn preflight(
        &self,
        observer: &dyn DeployObserver,
    ) -> Result<ServiceDescriptor, DeployError> {
        observer.on_phase(Phase::PreFlight);

        let descriptor = self
            .api
            .get_service(&self.service_id)
            .await
            .map_err(|source| DeployError::Client {
                phase: Phase::PreFlight,
                source,
            })?;

        if descriptor.state == ServiceState::Suspended {
            return Err(DeployError::Precondition {
                reason: "service is suspended".to_string(),
            });
        }

        let latest = self
            .api
            .latest_deploy(&self.service_id)
            .await
            .map_err(|source| DeployError::Client {
                phase: Phase::PreFlight,
                source,
            })?;

        if let Some(deploy) = latest
            && deploy.status == DeployStatus::BuildInProgress
        {
            return Err(DeployError::Precondition {
                reason: format!("deploy {} is already in progress", deploy.id),
            });
        }

        // Informational only: a failing probe here is worth knowing about
        // but is not a reason to block the deploy.
        if let Some(url) = self.probe_url(&descriptor) {
            let result = self.prober.check(url).await;
            info!(%result, "pre-flight health");
            observer.on_health(Phase::PreFlight, &result);
        }

        Ok(descriptor)
    }

    async fn submit(&self, observer: &dyn DeployObserver) -> Result<Deploy, DeployError> {
        observer.on_phase(Phase::Submit);

        let deploy = self
            .api
            .create_deploy(&self.service_id)
            .await
            .map_err(|source| DeployError::Client {
                phase: Phase::Submit,
                source,
            })?;

        info!(deploy = %deploy.id, "deploy submitted");
        Ok(deploy)
    }

    /// Poll the submitted deploy until it reaches a terminal state or the
    /// wait budget runs out. A single failed poll is absorbed and retried on
    /// the next tick; only a genuine terminal failure or budget exhaustion
    /// ends the loop abnormally. Total wait is bounded by
    /// `max_wait + poll_interval`.
    async fn poll(
        &self,
        submitted: Deploy,
        observer: &dyn DeployObserver,
    ) -> Result<Deploy, DeployError> {
        observer.on_phase(Phase::Polling);

        let deploy_id = submitted.id.clone();
        let started = Instant::now();
        let mut tracker = StatusTracker::new();

        if let Some(status) = tracker.observe(submitted.status) {
            observer.on_status_change(&deploy_id, status);
        }
        if let Some(result) = self.check_terminal(submitted) {
            return result;
        }

        loop {
            if started.elapsed() >= self.tunables.max_wait {
                return Err(DeployError::Timeout {
                    id: deploy_id,
                    waited: started.elapsed(),
                    last_status: tracker.last().unwrap_or(DeployStatus::Unknown),
                });
            }

            tokio::time::sleep(self.tunables.poll_interval).await;

            let latest = match self.api.latest_deploy(&self.service_id).await {
                Ok(d) => d,
                Err(e) => {
                    // Transient inspector errors must not kill the deploy.
                    warn!(error = %e, "poll failed, retrying on next tick");
                    continue;
                }
            };

            let deploy = match latest {
                Some(d) if d.id == deploy_id => d,
                Some(d) => {
                    warn!(
                        observed = %d.id,
                        expected = %deploy_id,
                        "newer deploy observed while polling"
                    );
                    continue;
                }
                None => {
                    debug!("deploy list transiently empty");
                    continue;
                }
            };

            if let Some(status) = tracker.observe(deploy.status) {
                observer.on_status_change(&deploy_id, status);
            }
            if let Some(result) = self.check_terminal(deploy) {
                return result;
            }
        }
    }

    /// Map a terminal status to the loop's outcome; `None` keeps polling.
    fn check_terminal(&self, deploy: Deploy) -> Option<Result<Deploy, DeployError>> {
        if !deploy.status.is_terminal() {
            return None;
        }
        if deploy.status == DeployStatus::Live {
            Some(Ok(deploy))
        } else {
            Some(Err(DeployError::Failed {
                id: deploy.id,
                status: deploy.status,
            }))
        }
    }

    /// Post-flight verification. The platform already reports success, so
    /// anything that goes wrong here degrades to a warning.
    async fn postflight(
        &self,
        descriptor: &ServiceDescriptor,
        observer: &dyn DeployObserver,
        diagnostics: &mut Diagnostics,
    ) {
        observer.on_phase(Phase::PostFlight);

        // Let the platform finish routing traffic before probing.
        if !self.tunables.settle_period.is_zero() {
            tokio::time::sleep(self.tunables.settle_period).await;
        }

        let Some(url) = self.probe_url(descriptor) else {
            let warning = Warning::probe_unavailable(
                "service has no public URL; skipping post-flight health probe",
            );
            observer.on_warning(&warning.message);
            diagnostics.warn(warning);
            return;
        };

        let result = self.prober.check(url).await;
        observer.on_health(Phase::PostFlight, &result);

        if !result.is_healthy() {
            let warning =
                Warning::post_flight_health(format!("post-flight health probe reported {result}"));
            observer.on_warning(&warning.message);
            diagnostics.warn(warning);
        }
    }

    /// Configured public URL, falling back to what the descriptor reports.
    fn probe_url<'a>(&'a self, descriptor: &'a ServiceDescriptor) -> Option<&'a str> {
        self.service_url
            .as_deref()
            .or(descriptor.url.as_deref())
    }
}
