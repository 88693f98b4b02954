// ABOUTME: HTTP implementation of the control-plane API using reqwest.
// ABOUTME: Attaches bearer auth and a uniform timeout; performs no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;

use super::error::ClientError;
use super::models::{Deploy, EnvVar, ServiceDescriptor};
use super::traits::ControlPlaneApi;
use crate::types::ServiceId;

/// Default timeout applied to every control-plane request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated client for the hosting platform's control plane.
///
/// Every request carries the bearer credential and the configured timeout.
/// Errors are translated uniformly: non-2xx responses become
/// `ClientError::Api` with the raw body attached, network failures become
/// `ClientError::Transport`. Retry policy belongs to callers.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a client against `base_url` (no trailing slash required).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issue one request and decode the JSON response.
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ClientError> {
        let url = self.url(path);
        debug!(method = %method, url = %url, "control plane request");

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&text).map_err(|e| {
                debug!(error = %e, body = %text, "failed to parse response");
                ClientError::from(e)
            })
        } else {
            Err(ClientError::Api {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[async_trait]
impl ControlPlaneApi for HttpClient {
    async fn get_service(&self, service: &ServiceId) -> Result<ServiceDescriptor, ClientError> {
        self.request(Method::GET, &format!("/services/{service}"), None)
            .await
    }

    async fn list_deploys(
        &self,
        service: &ServiceId,
        limit: usize,
    ) -> Result<Vec<Deploy>, ClientError> {
        self.request(
            Method::GET,
            &format!("/services/{service}/deploys?limit={limit}"),
            None,
        )
        .await
    }

    async fn create_deploy(&self, service: &ServiceId) -> Result<Deploy, ClientError> {
        self.request(
            Method::POST,
            &format!("/services/{service}/deploys"),
            Some(&serde_json::json!({})),
        )
        .await
    }

    async fn list_env_vars(&self, service: &ServiceId) -> Result<Vec<EnvVar>, ClientError> {
        self.request(Method::GET, &format!("/services/{service}/env-vars"), None)
            .await
    }

    async fn create_env_var(
        &self,
        service: &ServiceId,
        var: &EnvVar,
    ) -> Result<EnvVar, ClientError> {
        self.request(
            Method::POST,
            &format!("/services/{service}/env-vars"),
            Some(&serde_json::json!({ "key": var.key, "value": var.value })),
        )
        .await
    }

    async fn update_env_var(
        &self,
        service: &ServiceId,
        var: &EnvVar,
    ) -> Result<EnvVar, ClientError> {
        // Keys come from user-supplied env files and may need escaping.
        let key = urlencoding::encode(&var.key);
        self.request(
            Method::PUT,
            &format!("/services/{service}/env-vars/{key}"),
            Some(&serde_json::json!({ "value": var.value })),
        )
        .await
    }
}
