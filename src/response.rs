//! Directions provider reply and its normalization into a route plan.

use serde::Deserialize;
use tracing::warn;

use crate::error::RouteError;
use crate::optimizer::{LegSummary, OptimizedRoute, RoutePlan};
use crate::polyline::Polyline;
use crate::position::Position;
use crate::request::RouteRequest;

/// Status sentinel of a successful reply.
pub const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<ProviderRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderRoute {
    pub legs: Vec<ProviderLeg>,
    pub overview_polyline: Option<OverviewPolyline>,
    /// Permutation of indices into the submitted waypoints.
    #[serde(default)]
    pub waypoint_order: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderLeg {
    /// Meters.
    pub distance: ValueField,
    /// Seconds.
    pub duration: ValueField,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValueField {
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

impl DirectionsResponse {
    /// Validates the reply against `request` and builds the route plan.
    ///
    /// `return_to_origin` must match the value the request was issued with,
    /// since it decides which destinations `waypoint_order` refers to.
    pub fn into_plan(
        self,
        request: &RouteRequest,
        return_to_origin: bool,
    ) -> Result<RoutePlan, RouteError> {
        if self.status != STATUS_OK {
            warn!(status = %self.status, "directions provider returned non-OK status");
            return Err(RouteError::Provider(match self.error_message {
                Some(message) => format!("{}: {}", self.status, message),
                None => self.status,
            }));
        }

        // with waypoint optimization the provider returns a single route
        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::Provider("response contains no routes".to_string()))?;

        // a route to at least one stop always has a leg
        if route.legs.is_empty() {
            return Err(RouteError::Provider("route has no legs".to_string()));
        }
        let legs = summarize_legs(&route.legs);
        let (distance, duration) = aggregate_legs(&legs)?;

        let shape = request.plan(return_to_origin);
        let mut waypoints = reorder_waypoints(shape.waypoints, &route.waypoint_order)?;
        waypoints.extend(shape.fixed_tail);

        let encoded = route.overview_polyline.ok_or_else(|| {
            RouteError::Provider("route is missing overview_polyline".to_string())
        })?;
        let path = Polyline::decode(&encoded.points)?;

        Ok(RoutePlan {
            route: OptimizedRoute {
                distance,
                duration,
                path,
                legs,
            },
            waypoints,
        })
    }
}

fn summarize_legs(legs: &[ProviderLeg]) -> Vec<LegSummary> {
    legs.iter()
        .map(|leg| LegSummary {
            distance: leg.distance.value,
            duration: leg.duration.value,
        })
        .collect()
}

/// Sums distance and duration over the legs, in leg order.
pub fn aggregate_legs(legs: &[LegSummary]) -> Result<(u64, u64), RouteError> {
    legs.iter().try_fold((0u64, 0u64), |(distance, duration), leg| {
        let distance = distance.checked_add(leg.distance);
        let duration = duration.checked_add(leg.duration);
        match (distance, duration) {
            (Some(distance), Some(duration)) => Ok((distance, duration)),
            _ => Err(RouteError::Provider(
                "leg totals overflow".to_string(),
            )),
        }
    })
}

/// Applies the provider's visiting order: `ordered[i] = waypoints[order[i]]`.
///
/// `order` must be a permutation of `0..waypoints.len()`.
pub fn reorder_waypoints(
    waypoints: &[Position],
    order: &[usize],
) -> Result<Vec<Position>, RouteError> {
    if order.len() != waypoints.len() {
        return Err(RouteError::Provider(format!(
            "waypoint_order has {} entries for {} waypoints",
            order.len(),
            waypoints.len()
        )));
    }

    let mut seen = vec![false; waypoints.len()];
    let mut ordered = Vec::with_capacity(waypoints.len());
    for &index in order {
        let Some(position) = waypoints.get(index) else {
            return Err(RouteError::Provider(format!(
                "waypoint_order index {} out of range for {} waypoints",
                index,
                waypoints.len()
            )));
        };
        if std::mem::replace(&mut seen[index], true) {
            return Err(RouteError::Provider(format!(
                "waypoint_order repeats index {}",
                index
            )));
        }
        ordered.push(*position);
    }

    Ok(ordered)
}
