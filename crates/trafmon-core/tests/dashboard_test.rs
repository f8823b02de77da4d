#![allow(clippy::unwrap_used)]
// Integration tests for `Dashboard` against a wiremock backend.

use std::time::Duration;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trafmon_core::{
    ActionOutcome, CoreError, Dashboard, DashboardConfig, Preapproved, Resource, TableId,
};

// ── Helpers ─────────────────────────────────────────────────────────

const LIST_ROUTES: [&str; 5] = [
    "/api/traffic",
    "/api/interfaces",
    "/api/alerts",
    "/api/packets",
    "/api/users",
];

async fn setup() -> (MockServer, Dashboard) {
    setup_with_interval(Duration::from_secs(3600)).await
}

async fn setup_with_interval(period: Duration) -> (MockServer, Dashboard) {
    let server = MockServer::start().await;
    let mut config = DashboardConfig::new(Url::parse(&server.uri()).unwrap());
    config.refresh_interval = period;
    let dashboard = Dashboard::new(config).unwrap();
    (server, dashboard)
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn interfaces_body(monitored: bool) -> serde_json::Value {
    json!([{
        "id": 1,
        "name": "eth0",
        "ip_address": "192.168.1.10",
        "mac_address": "aa:bb:cc:dd:ee:ff",
        "status": "up",
        "is_monitored": monitored
    }])
}

async fn requests_to(server: &MockServer, verb: &str, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == route)
        .count()
}

// ── Fetching ────────────────────────────────────────────────────────

#[tokio::test]
async fn load_traffic_updates_both_charts() {
    let (server, dashboard) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/traffic",
        json!([
            { "timestamp": "2024-06-15T10:30:00", "incoming_bytes": 10, "outgoing_bytes": 20, "protocol": "TCP" },
            { "timestamp": "2024-06-15T10:30:05", "incoming_bytes": 30, "outgoing_bytes": 5, "protocol": "UDP" }
        ]),
    )
    .await;

    assert!(dashboard.load(Resource::Traffic).await.unwrap());

    let traffic = dashboard.store().traffic();
    assert_eq!(traffic.charts.traffic.incoming.data, [10, 30]);
    assert_eq!(traffic.charts.traffic.outgoing.data, [20, 5]);
    assert_eq!(traffic.charts.protocols.tally.tcp, 1);
    assert_eq!(traffic.charts.protocols.tally.udp, 1);
    assert_eq!(traffic.charts.protocols.tally.icmp, 0);
    assert_eq!(traffic.charts.protocols.tally.other, 0);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_view() {
    let (server, dashboard) = setup().await;
    mount_json(&server, "GET", "/api/interfaces", interfaces_body(true)).await;
    dashboard.load(Resource::Interfaces).await.unwrap();

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/interfaces"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = dashboard.load(Resource::Interfaces).await;
    assert!(matches!(result, Err(CoreError::Api { status: Some(500), .. })));

    let interfaces = dashboard.store().interfaces();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].name, "eth0");
}

#[tokio::test]
async fn non_json_body_is_a_failed_fetch() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    assert!(dashboard.load(Resource::Users).await.is_err());
    assert!(dashboard.store().users().is_empty());
}

#[tokio::test]
async fn late_response_does_not_overwrite_newer_one() {
    let (server, dashboard) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1, "timestamp": "t", "alert_type": "old" }]))
                .set_delay(Duration::from_millis(400)),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        "/api/alerts",
        json!([{ "id": 2, "timestamp": "t", "alert_type": "new" }]),
    )
    .await;

    let slow = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.load(Resource::Alerts).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(dashboard.load(Resource::Alerts).await.unwrap());
    assert!(!slow.await.unwrap().unwrap(), "older response is discarded");

    let alerts = dashboard.store().alerts();
    assert_eq!(alerts[0].alert_type, "new");
}

#[tokio::test]
async fn start_fetches_every_resource_and_stop_is_final() {
    let (server, dashboard) = setup().await;
    mount_json(&server, "GET", "/api/traffic", json!([])).await;
    mount_json(&server, "GET", "/api/interfaces", interfaces_body(false)).await;
    mount_json(&server, "GET", "/api/alerts", json!([])).await;
    mount_json(&server, "GET", "/api/packets", json!([])).await;
    mount_json(&server, "GET", "/api/users", json!([])).await;

    let mut interfaces = dashboard.store().subscribe_interfaces();
    let mut users = dashboard.store().subscribe_users();
    dashboard.start().await;

    tokio::time::timeout(Duration::from_secs(5), interfaces.changed())
        .await
        .unwrap()
        .unwrap();
    tokio::time::timeout(Duration::from_secs(5), users.changed())
        .await
        .unwrap()
        .unwrap();

    for route in LIST_ROUTES {
        let mut seen = 0;
        for _ in 0..50 {
            seen = requests_to(&server, "GET", route).await;
            if seen > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(seen, 1, "{route} fetched once on start");
    }

    dashboard.stop().await;
    assert!(dashboard.is_stopped());

    // A stopped dashboard does not restart.
    dashboard.start().await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(requests_to(&server, "GET", "/api/traffic").await, 1);
}

#[tokio::test]
async fn timer_keeps_polling_until_stopped() {
    let (server, dashboard) = setup_with_interval(Duration::from_millis(100)).await;
    // Traffic answers slower than the period, so cycles overlap.
    Mock::given(method("GET"))
        .and(path("/api/traffic"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_millis(250)),
        )
        .mount(&server)
        .await;
    for route in &LIST_ROUTES[1..] {
        mount_json(&server, "GET", route, json!([])).await;
    }

    dashboard.start().await;
    tokio::time::sleep(Duration::from_millis(600)).await;

    for route in LIST_ROUTES {
        let seen = requests_to(&server, "GET", route).await;
        assert!(seen >= 2, "{route} fetched {seen} times");
    }
    let traffic = requests_to(&server, "GET", "/api/traffic").await;
    assert!(traffic >= 3, "cycles kept firing behind the slow fetch ({traffic})");

    dashboard.stop().await;
    // Let fetches issued before the stop finish, then check nothing new goes out.
    tokio::time::sleep(Duration::from_millis(400)).await;
    let mut settled = Vec::new();
    for route in LIST_ROUTES {
        settled.push(requests_to(&server, "GET", route).await);
    }
    tokio::time::sleep(Duration::from_millis(400)).await;
    for (route, before) in LIST_ROUTES.into_iter().zip(settled) {
        assert_eq!(requests_to(&server, "GET", route).await, before, "{route} after stop");
    }
}

#[tokio::test]
async fn stop_lets_in_flight_fetches_land() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 1, "name": "alice" }]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let mut users = dashboard.store().subscribe_users();
    dashboard.start().await;
    dashboard.stop().await;
    assert!(dashboard.store().users().is_empty());

    tokio::time::timeout(Duration::from_secs(5), users.changed())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(dashboard.store().users()[0].name, "alice");
}

// ── Tab navigation ──────────────────────────────────────────────────

#[tokio::test]
async fn selecting_a_tab_refreshes_only_that_resource() {
    let (server, dashboard) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/alerts",
        json!([{ "id": 5, "timestamp": "t", "alert_type": "Port Scan" }]),
    )
    .await;

    let mut alerts = dashboard.store().subscribe_alerts();
    assert_eq!(dashboard.select_tab("Alerts"), Some(Resource::Alerts));
    tokio::time::timeout(Duration::from_secs(5), alerts.changed())
        .await
        .unwrap()
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/alerts");

    assert_eq!(dashboard.select_tab("settings"), None);
}

// ── Actions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_monitoring_refetches_interfaces() {
    let (server, dashboard) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/interfaces/1/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(&server, "GET", "/api/interfaces", interfaces_body(true)).await;

    dashboard.toggle_monitoring(1).await.unwrap();

    assert_eq!(requests_to(&server, "GET", "/api/interfaces").await, 1);
    let table = dashboard.store().table(TableId::Interfaces);
    let action = table.rows[0].action.as_ref().unwrap();
    assert_eq!(action.label, "Stop Monitoring");
}

#[tokio::test]
async fn non_json_action_reply_is_returned_and_skips_refetch() {
    let (server, dashboard) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/alerts/3/resolve"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = dashboard.resolve_alert(3).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    assert_eq!(requests_to(&server, "GET", "/api/alerts").await, 0);
}

#[tokio::test]
async fn resolve_alert_refetches_alerts() {
    let (server, dashboard) = setup().await;
    mount_json(&server, "POST", "/api/alerts/3/resolve", json!({ "success": true })).await;
    mount_json(
        &server,
        "GET",
        "/api/alerts",
        json!([{ "id": 3, "timestamp": "t", "alert_type": "Port Scan", "is_resolved": true }]),
    )
    .await;

    dashboard.resolve_alert(3).await.unwrap();

    let table = dashboard.store().table(TableId::Alerts);
    assert_eq!(table.rows[0].cells[4], "Resolved");
    assert!(table.rows[0].action.is_none());
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let (server, dashboard) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = dashboard.delete_user(2, &Preapproved(false)).await.unwrap();
    assert_eq!(outcome, ActionOutcome::Declined);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn confirmed_delete_removes_and_refetches() {
    let (server, dashboard) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        "/api/users",
        json!([{ "id": 1, "name": "alice", "role": "admin" }]),
    )
    .await;

    let prompts = std::sync::Mutex::new(Vec::new());
    let confirm = |prompt: &str| {
        prompts.lock().unwrap().push(prompt.to_owned());
        true
    };
    let outcome = dashboard.delete_user(2, &confirm).await.unwrap();

    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(
        prompts.lock().unwrap().as_slice(),
        ["Are you sure you want to delete this user?"]
    );
    assert_eq!(dashboard.store().users()[0].name, "alice");
}

#[tokio::test]
async fn deleting_a_missing_user_is_not_found() {
    let (server, dashboard) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/77"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = dashboard
        .delete_user(77, &Preapproved(true))
        .await
        .unwrap_err();
    match err {
        CoreError::NotFound {
            resource,
            identifier,
        } => {
            assert_eq!(resource, "user");
            assert_eq!(identifier, "77");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn json_error_reply_still_refetches() {
    let (server, dashboard) = setup().await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "User not found" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        "/api/users",
        json!([{ "id": 1, "name": "alice" }]),
    )
    .await;

    let err = dashboard
        .delete_user(2, &Preapproved(true))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::NotFound { ref identifier, .. } if identifier == "2"));
    assert_eq!(requests_to(&server, "GET", "/api/users").await, 1);
    assert_eq!(dashboard.store().users().len(), 1);
    assert_eq!(dashboard.store().users()[0].name, "alice");
}

#[tokio::test]
async fn json_error_reply_to_toggle_refetches_interfaces() {
    let (server, dashboard) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/interfaces/1/toggle"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "busy" })))
        .mount(&server)
        .await;
    mount_json(&server, "GET", "/api/interfaces", interfaces_body(false)).await;

    let err = dashboard.toggle_monitoring(1).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    assert_eq!(requests_to(&server, "GET", "/api/interfaces").await, 1);
    assert_eq!(dashboard.store().interfaces().len(), 1);
}

// ── Summary and trend ───────────────────────────────────────────────

#[tokio::test]
async fn summary_and_trend_are_fetched_on_demand() {
    let (server, dashboard) = setup().await;
    mount_json(
        &server,
        "GET",
        "/api/traffic_stats",
        json!({ "total_packets": 10, "total_bytes": 1536, "active_connections": 2, "alert_count": 1 }),
    )
    .await;
    mount_json(
        &server,
        "GET",
        "/api/traffic_trend",
        json!([{ "time": "10:00", "bytes": 100 }, { "time": "10:01", "bytes": 200 }]),
    )
    .await;

    let summary = dashboard.summary().await.unwrap();
    assert_eq!(summary.total_bytes, 1536);
    assert_eq!(summary.alert_count, 1);

    let trend = dashboard.trend().await.unwrap();
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[1].bytes, 200);
}
