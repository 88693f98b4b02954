// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::Instant;

use crate::api::{DeployStatus, ServiceState};
use crate::deploy::{DeployObserver, Phase};
use crate::health::HealthResult;
use crate::monitor::MonitorObserver;
use crate::types::DeployId;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({elapsed:.1}s)");
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => {
                self.emit_json("success", message);
            }
        }
    }

    /// Print a warning message.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_json("warning", message),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.start_time.map(|_| self.elapsed_secs()),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn emit_json(&self, event: &str, message: &str) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.start_time.map(|_| self.elapsed_secs()),
        };
        if let Ok(json) = serde_json::to_string(&event) {
            println!("{json}");
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

/// Subscribes the CLI's output surface to orchestrator and monitor events.
pub struct ConsoleReporter {
    output: Output,
}

impl ConsoleReporter {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl DeployObserver for ConsoleReporter {
    fn on_phase(&self, phase: Phase) {
        self.output.progress(&format!("  → {phase}..."));
    }

    fn on_status_change(&self, deploy: &DeployId, status: DeployStatus) {
        self.output.progress(&format!("    {deploy}: {status}"));
    }

    fn on_health(&self, phase: Phase, result: &HealthResult) {
        self.output.progress(&format!("    {phase} health: {result}"));
    }

    fn on_warning(&self, message: &str) {
        self.output.warning(message);
    }
}

impl MonitorObserver for ConsoleReporter {
    fn on_check(&self, health: &HealthResult, state: Option<ServiceState>) {
        match state {
            Some(state) => self
                .output
                .progress(&format!("  {health} (service: {state})")),
            None => self.output.progress(&format!("  {health}")),
        }
    }

    fn on_alert(&self, consecutive_failures: u32, health: &HealthResult) {
        self.output.warning(&format!(
            "service failed {consecutive_failures} consecutive checks, latest: {health}"
        ));
    }
}
