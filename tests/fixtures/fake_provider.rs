//! In-process directions provider returning canned replies.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use route_optimizer::response::DirectionsResponse;
use route_optimizer::{DirectionsProvider, RouteError, RouteRequest};

type Responder = Box<dyn Fn(&RouteRequest) -> Result<DirectionsResponse, RouteError> + Send + Sync>;

pub struct FakeProvider {
    responder: Responder,
    return_to_origin: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<RouteRequest>>,
}

impl FakeProvider {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RouteRequest) -> Result<DirectionsResponse, RouteError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            return_to_origin: true,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the given JSON body.
    pub fn replying(body: String) -> Self {
        Self::new(move |_| Ok(serde_json::from_str(&body).expect("fixture JSON")))
    }

    pub fn open_route(mut self) -> Self {
        self.return_to_origin = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl DirectionsProvider for FakeProvider {
    fn returns_to_origin(&self) -> bool {
        self.return_to_origin
    }

    fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

/// Builds a provider reply in the documented JSON shape.
pub fn ok_body(waypoint_order: &[usize], legs: &[(u64, u64)], points: &str) -> String {
    let legs = legs
        .iter()
        .map(|(distance, duration)| {
            serde_json::json!({
                "distance": {"text": format!("{} m", distance), "value": distance},
                "duration": {"text": format!("{} s", duration), "value": duration},
            })
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "status": "OK",
        "geocoded_waypoints": [],
        "routes": [{
            "summary": "Central Park West",
            "legs": legs,
            "overview_polyline": {"points": points},
            "waypoint_order": waypoint_order,
        }],
    })
    .to_string()
}
