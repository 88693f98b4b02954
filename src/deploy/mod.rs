// ABOUTME: Deployment orchestration: phases, polling, and rollback reporting.
// ABOUTME: Exports the orchestrator and its observer/error surface.

mod error;
mod events;
mod orchestrator;
mod rollback;

pub use error::DeployError;
pub use events::{DeployObserver, NullObserver, Phase, StatusTracker};
pub use orchestrator::Orchestrator;
pub use rollback::{ROLLBACK_HISTORY_WINDOW, previous_live};
