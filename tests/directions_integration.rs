//! HTTP round trip against a stub directions provider.
//!
//! Runs WireMock in a container and checks the request the client sends and
//! the handling of OK, non-OK and non-2xx replies. Needs Docker:
//! `cargo test -- --ignored`.

mod fixtures;

use std::time::{Duration, Instant};

use testcontainers::core::IntoContainerPort;
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, TestcontainersError};

use route_optimizer::{DirectionsClient, DirectionsConfig, ErrorKind, RouteOptimizer};

use fixtures::{DEPOT, TODAY, ok_body, positions};

const API_KEY: &str = "integration-key";
const DIRECTIONS_PATH: &str = "/maps/api/directions/json";

fn wiremock_container() -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let image = GenericImage::new("wiremock/wiremock", "3.9.1")
        .with_exposed_port(8080.tcp())
        .with_startup_timeout(Duration::from_secs(60));

    let container = image.start()?;
    let port = container.get_host_port_ipv4(8080.tcp())?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(30) {
        let ready = reqwest::blocking::get(format!("{}/__admin/mappings", base_url))
            .map(|resp| resp.status().is_success())
            .unwrap_or(false);
        if ready {
            break;
        }
        std::thread::sleep(Duration::from_millis(500));
    }

    Ok((container, base_url))
}

fn stub(base_url: &str, mapping: serde_json::Value) {
    let response = reqwest::blocking::Client::new()
        .post(format!("{}/__admin/mappings", base_url))
        .json(&mapping)
        .send()
        .expect("register stub");
    assert!(response.status().is_success(), "stub rejected: {}", response.status());
}

fn optimizer_for(base_url: &str, path: &str) -> RouteOptimizer<DirectionsClient> {
    let config = DirectionsConfig::new(API_KEY)
        .with_base_url(format!("{}{}", base_url, path))
        .with_timeout_secs(10);
    RouteOptimizer::new(DirectionsClient::new(config).expect("build directions client"))
}

#[test]
#[ignore = "requires docker"]
fn directions_round_trip_over_http() {
    let (container, base_url) = wiremock_container().expect("start WireMock container");

    let legs = [(100, 60), (250, 180), (75, 45), (5, 5)];
    let body: serde_json::Value =
        serde_json::from_str(&ok_body(&[2, 0, 1], &legs, "_p~iF~ps|U")).unwrap();
    stub(
        &base_url,
        serde_json::json!({
            "request": {
                "method": "GET",
                "urlPath": DIRECTIONS_PATH,
                "queryParameters": {
                    "key": {"equalTo": API_KEY},
                    "origin": {"equalTo": DEPOT.position().to_string()},
                    "destination": {"equalTo": DEPOT.position().to_string()},
                    "waypoints": {"matches": "^optimize:true\\|.*"},
                    "mode": {"equalTo": "driving"}
                }
            },
            "response": {"status": 200, "jsonBody": body}
        }),
    );

    let stops = positions(TODAY);
    let plan = optimizer_for(&base_url, DIRECTIONS_PATH)
        .optimize_route(DEPOT.position(), &stops)
        .expect("optimize over HTTP");

    assert_eq!(plan.waypoints, vec![stops[2], stops[0], stops[1]]);
    assert_eq!(plan.route.distance, 430);
    assert_eq!(plan.route.duration, 290);
    assert_eq!(plan.route.path.len(), 1);

    drop(container);
}

#[test]
#[ignore = "requires docker"]
fn provider_failures_over_http() {
    let (container, base_url) = wiremock_container().expect("start WireMock container");

    stub(
        &base_url,
        serde_json::json!({
            "request": {"method": "GET", "urlPath": "/denied/json"},
            "response": {
                "status": 200,
                "jsonBody": {"status": "REQUEST_DENIED", "error_message": "bad key", "routes": []}
            }
        }),
    );
    stub(
        &base_url,
        serde_json::json!({
            "request": {"method": "GET", "urlPath": "/unavailable/json"},
            "response": {"status": 503, "body": "upstream down"}
        }),
    );
    stub(
        &base_url,
        serde_json::json!({
            "request": {"method": "GET", "urlPath": "/garbage/json"},
            "response": {"status": 200, "body": "<html>not json</html>"}
        }),
    );

    let stops = positions(TODAY);

    let denied = optimizer_for(&base_url, "/denied/json")
        .optimize_route(DEPOT.position(), &stops)
        .unwrap_err();
    assert_eq!(denied.kind(), ErrorKind::Provider);
    assert!(denied.to_string().contains("REQUEST_DENIED"));

    let unavailable = optimizer_for(&base_url, "/unavailable/json")
        .optimize_route(DEPOT.position(), &stops)
        .unwrap_err();
    assert_eq!(unavailable.kind(), ErrorKind::Transport);
    assert!(unavailable.to_string().contains("503"));

    let garbage = optimizer_for(&base_url, "/garbage/json")
        .optimize_route(DEPOT.position(), &stops)
        .unwrap_err();
    assert_eq!(garbage.kind(), ErrorKind::Provider);

    drop(container);
}
