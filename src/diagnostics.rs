// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects warnings that shouldn't fail a deploy but should be shown to users.

/// Collects non-fatal warnings during deployment operations.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a post-flight health warning.
    pub fn post_flight_health(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::PostFlightHealth,
            message: message.into(),
        }
    }

    /// Create a probe-unavailable warning.
    pub fn probe_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ProbeUnavailable,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Post-flight health probe reported non-healthy after a successful deploy.
    PostFlightHealth,
    /// No public URL known for the service, so a probe was skipped.
    ProbeUnavailable,
}
