// ABOUTME: Continuous health monitoring with debounced threshold alerting.
// ABOUTME: Repeats probe + inspect on an interval until cancelled.

use std::future::Future;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::api::{ControlPlaneApi, ServiceState};
use crate::config::MonitorConfig;
use crate::health::{HealthProbe, HealthResult};
use crate::types::ServiceId;

/// Receives monitoring observations and alerts.
pub trait MonitorObserver: Send + Sync {
    /// One check completed.
    fn on_check(&self, _health: &HealthResult, _state: Option<ServiceState>) {}

    /// The consecutive-failure threshold was reached.
    fn on_alert(&self, _consecutive_failures: u32, _health: &HealthResult) {}
}

/// Turns a stream of per-check outcomes into debounced alerts.
///
/// Counts consecutive failures; on reaching the threshold it signals exactly
/// one alert and resets, so a prolonged outage produces periodic reminders
/// instead of one alert per check.
#[derive(Debug)]
pub struct AlertDebouncer {
    threshold: u32,
    consecutive: u32,
}

impl AlertDebouncer {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive: 0,
        }
    }

    /// Record one observation. Returns true when an alert should fire.
    pub fn observe(&mut self, healthy: bool) -> bool {
        if healthy {
            self.consecutive = 0;
            return false;
        }

        self.consecutive += 1;
        if self.consecutive >= self.threshold {
            self.consecutive = 0;
            true
        } else {
            false
        }
    }

    /// Current consecutive failure count.
    pub fn consecutive(&self) -> u32 {
        self.consecutive
    }
}

/// Watches one service on a fixed interval until the shutdown future
/// resolves. All counters live inside the run loop and die with it.
pub struct Monitor<C, P> {
    api: C,
    prober: P,
    service_id: ServiceId,
    service_url: Option<String>,
    tunables: MonitorConfig,
}

impl<C: ControlPlaneApi, P: HealthProbe> Monitor<C, P> {
    pub fn new(
        api: C,
        prober: P,
        service_id: ServiceId,
        service_url: Option<String>,
        tunables: MonitorConfig,
    ) -> Self {
        Self {
            api,
            prober,
            service_id,
            service_url,
            tunables,
        }
    }

    /// Run until `shutdown` resolves. The first check happens immediately,
    /// then one per interval. Returns the number of checks performed.
    pub async fn run<F>(&self, observer: &dyn MonitorObserver, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut debouncer = AlertDebouncer::new(self.tunables.alert_threshold);
        let mut checks: u64 = 0;
        let mut last_check: Option<DateTime<Utc>> = None;

        let mut ticker = tokio::time::interval(self.tunables.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!(checks, "monitor stopping");
                    return checks;
                }
                _ = ticker.tick() => {
                    let (health, state) = self.observe_once().await;
                    checks += 1;
                    last_check = Some(Utc::now());
                    debug!(%health, ?state, last_check = ?last_check, "check complete");

                    observer.on_check(&health, state);
                    if debouncer.observe(health.is_healthy()) {
                        observer.on_alert(self.tunables.alert_threshold, &health);
                    }
                }
            }
        }
    }

    /// One check: fetch the service (state + URL fallback), then probe.
    /// Failures to even reach the control plane classify as probe errors so
    /// they count toward the alert threshold.
    async fn observe_once(&self) -> (HealthResult, Option<ServiceState>) {
        let (state, descriptor_url) = match self.api.get_service(&self.service_id).await {
            Ok(descriptor) => (Some(descriptor.state), descriptor.url),
            Err(e) => {
                if self.service_url.is_none() {
                    return (
                        HealthResult::Error {
                            message: format!("failed to fetch service: {e}"),
                        },
                        None,
                    );
                }
                (None, None)
            }
        };

        let url = self.service_url.as_deref().or(descriptor_url.as_deref());
        let health = match url {
            Some(url) => self.prober.check(url).await,
            None => HealthResult::Error {
                message: "service has no public URL to probe".to_string(),
            },
        };

        (health, state)
    }
}
