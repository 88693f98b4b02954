// ABOUTME: Rollback target reporting over recent deploy history.
// ABOUTME: Reports the previous live deploy; never issues a mutation.

use crate::api::{Deploy, DeployStatus};

/// How far back to look for a rollback candidate.
pub const ROLLBACK_HISTORY_WINDOW: usize = 5;

/// Pick the deploy a rollback would target from newest-first history.
///
/// The current live deploy is the most recent `live` entry; the target is
/// the one before it. Requires at least two live entries in the window,
/// otherwise there is nothing to roll back to and `None` is returned.
///
/// This is purely informational. The platform exposes no rollback endpoint,
/// so acting on the target (usually re-deploying its commit) is left to a
/// human or an external process.
pub fn previous_live(history: &[Deploy]) -> Option<&Deploy> {
    history
        .iter()
        .filter(|d| d.status == DeployStatus::Live)
        .nth(1)
}
