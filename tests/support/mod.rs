// ABOUTME: Shared test doubles for orchestration tests.
// ABOUTME: Scriptable in-memory control plane and health prober.

// Not every integration test file uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use stratus::api::{
    ClientError, ControlPlaneApi, Deploy, DeployStatus, EnvVar, ServiceDescriptor, ServiceKind,
    ServiceState,
};
use stratus::health::{HealthProbe, HealthResult};
use stratus::types::{DeployId, ServiceId};

pub fn descriptor(state: ServiceState, url: Option<&str>) -> ServiceDescriptor {
    ServiceDescriptor {
        id: ServiceId::new("srv-test"),
        name: "test-service".to_string(),
        kind: ServiceKind::WebService,
        state,
        url: url.map(str::to_string),
        plan: Some("starter".to_string()),
        region: Some("frankfurt".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn deploy(id: &str, status: DeployStatus) -> Deploy {
    Deploy {
        id: DeployId::new(id),
        service_id: ServiceId::new("srv-test"),
        status,
        created_at: Utc::now(),
        commit: None,
    }
}

fn internal_error() -> ClientError {
    ClientError::Api {
        status: 500,
        body: "internal error".to_string(),
    }
}

/// Scriptable control plane. `polls` holds the answers to successive
/// `list_deploys` calls (pre-flight latest-deploy lookups consume from the
/// same script); when only one entry remains it repeats forever, which makes
/// timeout scenarios easy to express. Cloning shares the script and
/// counters, so tests can keep a handle after handing one to the
/// orchestrator.
#[derive(Clone)]
pub struct FakeControlPlane {
    pub service: ServiceDescriptor,
    pub submit_response: Option<Deploy>,
    pub polls: Arc<Mutex<VecDeque<Result<Vec<Deploy>, ()>>>>,
    pub create_deploy_calls: Arc<AtomicUsize>,
}

impl FakeControlPlane {
    pub fn new(service: ServiceDescriptor) -> Self {
        Self {
            service,
            submit_response: None,
            polls: Arc::new(Mutex::new(VecDeque::new())),
            create_deploy_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_submit(mut self, deploy: Deploy) -> Self {
        self.submit_response = Some(deploy);
        self
    }

    pub fn push_poll(self, deploys: Vec<Deploy>) -> Self {
        self.polls.lock().unwrap().push_back(Ok(deploys));
        self
    }

    pub fn push_poll_error(self) -> Self {
        self.polls.lock().unwrap().push_back(Err(()));
        self
    }

    pub fn create_deploy_count(&self) -> usize {
        self.create_deploy_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ControlPlaneApi for FakeControlPlane {
    async fn get_service(&self, _service: &ServiceId) -> Result<ServiceDescriptor, ClientError> {
        Ok(self.service.clone())
    }

    async fn list_deploys(
        &self,
        _service: &ServiceId,
        _limit: usize,
    ) -> Result<Vec<Deploy>, ClientError> {
        let mut polls = self.polls.lock().unwrap();
        let step = if polls.len() > 1 {
            polls.pop_front()
        } else {
            polls.front().cloned()
        };
        match step {
            Some(Ok(deploys)) => Ok(deploys),
            Some(Err(())) => Err(internal_error()),
            None => Ok(vec![]),
        }
    }

    async fn create_deploy(&self, _service: &ServiceId) -> Result<Deploy, ClientError> {
        self.create_deploy_calls.fetch_add(1, Ordering::SeqCst);
        self.submit_response.clone().ok_or_else(internal_error)
    }

    async fn list_env_vars(&self, _service: &ServiceId) -> Result<Vec<EnvVar>, ClientError> {
        Ok(vec![])
    }

    async fn create_env_var(
        &self,
        _service: &ServiceId,
        var: &EnvVar,
    ) -> Result<EnvVar, ClientError> {
        Ok(var.clone())
    }

    async fn update_env_var(
        &self,
        _service: &ServiceId,
        var: &EnvVar,
    ) -> Result<EnvVar, ClientError> {
        Ok(var.clone())
    }
}

/// Prober that replays a scripted sequence of results, repeating the last.
pub struct FakeProber {
    results: Mutex<VecDeque<HealthResult>>,
}

impl FakeProber {
    pub fn healthy() -> Self {
        Self::with_results(vec![HealthResult::Healthy { response: None }])
    }

    pub fn with_results(results: Vec<HealthResult>) -> Self {
        Self {
            results: Mutex::new(results.into()),
        }
    }
}

#[async_trait]
impl HealthProbe for FakeProber {
    async fn check(&self, _service_url: &str) -> HealthResult {
        let mut results = self.results.lock().unwrap();
        if results.len() > 1 {
            results.pop_front().unwrap()
        } else {
            results
                .front()
                .cloned()
                .unwrap_or(HealthResult::Healthy { response: None })
        }
    }
}
