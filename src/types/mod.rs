// ABOUTME: Type-safe identifiers for remote control-plane resources.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod id;

pub use id::{DeployId, ServiceId};
