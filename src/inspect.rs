// ABOUTME: Combined service status gathering for the status command.
// ABOUTME: Fans out the three independent read-only calls concurrently.

use serde::Serialize;
use tracing::debug;

use crate::api::{ClientError, ControlPlaneApi, Deploy, ServiceDescriptor};
use crate::health::{HealthProbe, HealthResult};
use crate::types::ServiceId;

/// One-shot snapshot of a service: descriptor, most recent deploy, and a
/// fresh health probe. The three sources are fetched independently and may
/// be transiently inconsistent with each other; consumers that care about
/// deploy completion must look at the deploy status, not the service state.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub service: ServiceDescriptor,
    pub latest_deploy: Option<Deploy>,
    pub health: Option<HealthResult>,
}

/// Gather a [`ServiceStatus`].
///
/// When `url_override` is given, all three calls run concurrently; otherwise
/// the probe waits for the descriptor to learn the service URL. A service
/// with no public URL gets `health: None`.
///
/// # Errors
///
/// Returns the first client error from the descriptor or deploy lookup.
/// Probe failures are not errors; they classify into the result itself.
pub async fn fetch_status<C: ControlPlaneApi, P: HealthProbe>(
    api: &C,
    prober: &P,
    service: &ServiceId,
    url_override: Option<&str>,
) -> Result<ServiceStatus, ClientError> {
    debug!(service = %service, "gathering status");

    if let Some(url) = url_override {
        let (descriptor, latest, health) = tokio::join!(
            api.get_service(service),
            api.latest_deploy(service),
            prober.check(url),
        );
        return Ok(ServiceStatus {
            service: descriptor?,
            latest_deploy: latest?,
            health: Some(health),
        });
    }

    let (descriptor, latest) = tokio::join!(api.get_service(service), api.latest_deploy(service));
    let descriptor = descriptor?;

    let health = match descriptor.url.as_deref() {
        Some(url) => Some(prober.check(url).await),
        None => None,
    };

    Ok(ServiceStatus {
        service: descriptor,
        latest_deploy: latest?,
        health,
    })
}
