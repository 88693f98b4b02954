// ABOUTME: Integration tests for the continuous monitor loop.
// ABOUTME: Verifies periodic checks, alerting, and clean cancellation.

mod support;

use std::sync::Mutex;
use std::time::Duration;

use stratus::api::ServiceState;
use stratus::config::MonitorConfig;
use stratus::health::HealthResult;
use stratus::monitor::{Monitor, MonitorObserver};
use stratus::types::ServiceId;
use support::{FakeControlPlane, FakeProber, descriptor};

#[derive(Default)]
struct Recorder {
    checks: Mutex<Vec<bool>>,
    alerts: Mutex<Vec<u32>>,
}

impl MonitorObserver for Recorder {
    fn on_check(&self, health: &HealthResult, _state: Option<ServiceState>) {
        self.checks.lock().unwrap().push(health.is_healthy());
    }

    fn on_alert(&self, consecutive_failures: u32, _health: &HealthResult) {
        self.alerts.lock().unwrap().push(consecutive_failures);
    }
}

fn monitor(
    prober: FakeProber,
    threshold: u32,
) -> Monitor<FakeControlPlane, FakeProber> {
    let api = FakeControlPlane::new(descriptor(
        ServiceState::Available,
        Some("https://test.example.com"),
    ));
    Monitor::new(
        api,
        prober,
        ServiceId::new("srv-test"),
        None,
        MonitorConfig {
            interval: Duration::from_millis(10),
            alert_threshold: threshold,
        },
    )
}

/// Test: the loop checks repeatedly and stops when the shutdown future
/// resolves, returning how many checks ran.
#[tokio::test]
async fn monitor_checks_until_cancelled() {
    let recorder = Recorder::default();
    let checks = monitor(FakeProber::healthy(), 5)
        .run(&recorder, tokio::time::sleep(Duration::from_millis(100)))
        .await;

    assert!(checks >= 2, "expected several checks, got {checks}");
    assert_eq!(recorder.checks.lock().unwrap().len() as u64, checks);
    assert!(recorder.alerts.lock().unwrap().is_empty());
}

/// Test: sustained failure raises debounced alerts, one per threshold-sized
/// window rather than one per check.
#[tokio::test]
async fn sustained_failure_alerts_periodically() {
    let prober = FakeProber::with_results(vec![HealthResult::Unhealthy { code: 503 }]);
    let recorder = Recorder::default();

    let checks = monitor(prober, 3)
        .run(&recorder, tokio::time::sleep(Duration::from_millis(150)))
        .await;

    let alerts = recorder.alerts.lock().unwrap();
    assert!(!alerts.is_empty(), "no alert after {checks} failing checks");
    assert!(
        (alerts.len() as u64) <= checks / 3,
        "alerts must be debounced: {} alerts over {checks} checks",
        alerts.len()
    );
    assert!(alerts.iter().all(|&c| c == 3));
}

/// Test: a recovery in the middle resets the failure streak.
#[tokio::test]
async fn recovery_resets_the_failure_streak() {
    let prober = FakeProber::with_results(vec![
        HealthResult::Unhealthy { code: 503 },
        HealthResult::Unhealthy { code: 503 },
        HealthResult::Healthy { response: None },
        HealthResult::Unhealthy { code: 503 },
        HealthResult::Unhealthy { code: 503 },
        HealthResult::Healthy { response: None },
    ]);
    let recorder = Recorder::default();

    monitor(prober, 3)
        .run(&recorder, tokio::time::sleep(Duration::from_millis(80)))
        .await;

    assert!(
        recorder.alerts.lock().unwrap().is_empty(),
        "streaks of two never reach a threshold of three"
    );
}
