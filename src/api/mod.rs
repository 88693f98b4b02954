// ABOUTME: Control-plane API client, wire models, and operation traits.
// ABOUTME: The leaf dependency for all orchestration and monitoring code.

mod client;
mod error;
mod models;
mod traits;

pub use client::{DEFAULT_TIMEOUT, HttpClient};
pub use error::{ClientError, ClientErrorKind};
pub use models::{
    CommitInfo, Deploy, DeployStatus, EnvVar, ServiceDescriptor, ServiceKind, ServiceState,
};
pub use traits::ControlPlaneApi;
