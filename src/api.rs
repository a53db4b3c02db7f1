//! Inbound `POST /routes/optimize` contract, independent of any web framework.
//!
//! A host server authenticates the caller, passes the raw JSON body to
//! [`handle_optimize`] and writes back the returned status and body.

use serde::Deserialize;
use tracing::warn;

use crate::error::RouteError;
use crate::optimizer::RouteOptimizer;
use crate::position::Position;
use crate::traits::DirectionsProvider;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const OPTIMIZE_FAILED: &str = "Failed to optimize route";

#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequestBody {
    pub origin: Option<Position>,
    pub destinations: Option<Vec<Position>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
}

impl From<RouteError> for ApiError {
    fn from(error: RouteError) -> Self {
        match error {
            RouteError::InvalidArgument(message) => ApiError::BadRequest(message),
            other => {
                warn!(kind = ?other.kind(), error = %other, "route optimization failed");
                ApiError::InternalServerError(OPTIMIZE_FAILED.to_string())
            }
        }
    }
}

impl ApiError {
    pub fn into_response(self) -> ApiResponse {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (400, message),
            ApiError::InternalServerError(message) => (500, message),
        };
        ApiResponse {
            status,
            body: serde_json::json!({ "error": message }),
        }
    }
}

/// Handles one optimize call: 200 with the plan, 400 for missing or invalid
/// input, 500 for provider, transport and decode failures.
pub fn handle_optimize<P: DirectionsProvider>(
    optimizer: &RouteOptimizer<P>,
    body: &str,
) -> ApiResponse {
    match optimize(optimizer, body) {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

fn optimize<P: DirectionsProvider>(
    optimizer: &RouteOptimizer<P>,
    body: &str,
) -> Result<ApiResponse, ApiError> {
    let request: OptimizeRequestBody = serde_json::from_str(body)
        .map_err(|_| ApiError::BadRequest(MISSING_FIELDS.to_string()))?;

    let (origin, destinations) = match (request.origin, request.destinations) {
        (Some(origin), Some(destinations)) if !destinations.is_empty() => (origin, destinations),
        _ => return Err(ApiError::BadRequest(MISSING_FIELDS.to_string())),
    };

    let plan = optimizer.optimize_route(origin, &destinations)?;
    let body = serde_json::to_value(&plan)
        .map_err(|err| ApiError::InternalServerError(err.to_string()))?;

    Ok(ApiResponse { status: 200, body })
}
