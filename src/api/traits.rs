// ABOUTME: Control-plane operation traits consumed by orchestration code.
// ABOUTME: Seam for substituting fake implementations in tests.

use async_trait::async_trait;

use super::error::ClientError;
use super::models::{Deploy, EnvVar, ServiceDescriptor};
use crate::types::ServiceId;

/// Read and write operations against the hosting platform's control plane.
///
/// The orchestrator, reconciler, and monitor are generic over this trait so
/// they can run against an in-memory fake; [`super::HttpClient`] is the real
/// implementation.
#[async_trait]
pub trait ControlPlaneApi: Send + Sync {
    /// Fetch the current service descriptor.
    ///
    /// # Errors
    ///
    /// `ClientError::Api` with status 404 if the service does not exist.
    async fn get_service(&self, service: &ServiceId) -> Result<ServiceDescriptor, ClientError>;

    /// List deploys, newest first, at most `limit` entries.
    /// An empty list is a valid answer (service never deployed).
    async fn list_deploys(
        &self,
        service: &ServiceId,
        limit: usize,
    ) -> Result<Vec<Deploy>, ClientError>;

    /// Trigger a new deploy and return it as created by the platform.
    async fn create_deploy(&self, service: &ServiceId) -> Result<Deploy, ClientError>;

    /// List environment variables. Keys are unique per service.
    async fn list_env_vars(&self, service: &ServiceId) -> Result<Vec<EnvVar>, ClientError>;

    /// Create an environment variable that does not yet exist remotely.
    async fn create_env_var(
        &self,
        service: &ServiceId,
        var: &EnvVar,
    ) -> Result<EnvVar, ClientError>;

    /// Overwrite the value of an existing environment variable.
    async fn update_env_var(
        &self,
        service: &ServiceId,
        var: &EnvVar,
    ) -> Result<EnvVar, ClientError>;

    /// The most recent deploy, if any.
    async fn latest_deploy(&self, service: &ServiceId) -> Result<Option<Deploy>, ClientError> {
        let deploys = self.list_deploys(service, 1).await?;
        Ok(deploys.into_iter().next())
    }
}
