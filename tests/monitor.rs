use std::time::Duration;

use serde_json::json;
use tokio::sync::watch;
use vitalcare_lib::monitor::{MonitorController, MonitorUpdate, PollTiming};
use vitalcare_lib::notifications::NotificationFeed;
use vitalcare_lib::snapshot::{MemorySnapshotStore, VitalsSession};
use vitalcare_lib::source::HttpReadingSource;
use vitalcare_lib::vitals::{MetricType, SanitizedVitals, Severity};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn timing(interval_ms: u64) -> PollTiming {
    PollTiming {
        interval: Duration::from_millis(interval_ms),
        fetch_timeout: Duration::from_secs(1),
    }
}

fn source(server: &MockServer) -> HttpReadingSource {
    HttpReadingSource::new(&server.uri(), Duration::from_secs(1)).unwrap()
}

async fn next_update(updates: &mut watch::Receiver<Option<MonitorUpdate>>) -> MonitorUpdate {
    tokio::time::timeout(Duration::from_secs(5), updates.changed())
        .await
        .expect("no update within 5s")
        .expect("monitor dropped its sender");
    updates.borrow_and_update().clone().expect("update was empty")
}

async fn mount_json(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn critical_heart_rate_is_alerted_and_fed() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        json!([{"heart_rate": 130, "spo2": 99, "temperature": 36.5, "blood_pressure": 110, "timestamp": "2024-05-01T10:00:00Z"}]),
    )
    .await;

    let store = MemorySnapshotStore::new();
    let mut monitor = MonitorController::new(NotificationFeed::new(50));
    let mut updates = monitor.subscribe();
    monitor
        .start(source(&server), VitalsSession::open(store.clone()), timing(60_000))
        .unwrap();

    let update = next_update(&mut updates).await;
    monitor.stop().await.unwrap();

    assert_eq!(update.alerts.len(), 1);
    let alert = &update.alerts[0];
    assert_eq!(alert.vital_type, MetricType::HeartRate);
    assert_eq!(alert.severity, Severity::Critical);
    assert!(alert.action_required);
    assert!(alert.message.starts_with("Heart rate is 130 BPM"));
    assert_eq!(update.statuses.overall(), Severity::Critical);
    assert_eq!(update.reading_timestamp.as_deref(), Some("2024-05-01T10:00:00Z"));

    assert_eq!(store.saved(), Some(update.vitals));
    assert_eq!(monitor.alerts(None), update.alerts);
    assert_eq!(monitor.unread_counts(), (1, 1));

    assert!(monitor.mark_read(&alert.id));
    assert_eq!(monitor.unread_counts(), (0, 0));
    assert!(monitor.delete(&alert.id));
    assert!(!monitor.delete(&alert.id));
    assert!(monitor.alerts(None).is_empty());
}

#[tokio::test]
async fn invalid_values_keep_last_known_good() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"heart_rate": 80, "spo2": 98, "temperature": 36.6, "blood_pressure": 115}
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        json!([{"heart_rate": 0, "spo2": null, "temperature": -127, "blood_pressure": 200}]),
    )
    .await;

    let mut monitor = MonitorController::new(NotificationFeed::default());
    let mut updates = monitor.subscribe();
    monitor
        .start(
            source(&server),
            VitalsSession::open(MemorySnapshotStore::new()),
            timing(30),
        )
        .unwrap();

    let first = next_update(&mut updates).await;
    let second = next_update(&mut updates).await;
    monitor.stop().await.unwrap();

    let expected = SanitizedVitals {
        heart_rate: Some(80.0),
        spo2: Some(98.0),
        temperature: Some(36.6),
        systolic: Some(115.0),
        diastolic: None,
    };
    assert_eq!(first.vitals, expected);
    assert_eq!(second.vitals, expected);
    assert!(second.alerts.is_empty());
}

#[tokio::test]
async fn failed_fetches_change_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_json(&server, json!([])).await;

    let restored = SanitizedVitals {
        heart_rate: Some(75.0),
        ..Default::default()
    };
    let store = MemorySnapshotStore::with_snapshot(restored);
    let mut monitor = MonitorController::new(NotificationFeed::default());
    let updates = monitor.subscribe();
    monitor
        .start(source(&server), VitalsSession::open(store.clone()), timing(20))
        .unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    monitor.stop().await.unwrap();

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.len() >= 3, "polling stopped after a failure");
    assert!(updates.borrow().is_none());
    assert_eq!(monitor.latest_vitals(), restored);
    assert!(monitor.alerts(None).is_empty());
    assert_eq!(store.writes(), 0);
}
