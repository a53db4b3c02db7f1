//! Route requests and their provider query encoding.

use serde::Serialize;

use crate::config::TravelMode;
use crate::error::RouteError;
use crate::position::Position;

/// Marker that asks the provider to reorder the submitted waypoints.
pub const OPTIMIZE_WAYPOINTS: &str = "optimize:true";

/// A validated origin plus at least one destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    origin: Position,
    destinations: Vec<Position>,
}

impl RouteRequest {
    pub fn new(origin: Position, destinations: Vec<Position>) -> Result<Self, RouteError> {
        if destinations.is_empty() {
            return Err(RouteError::InvalidArgument(
                "at least one destination is required".to_string(),
            ));
        }
        if !origin.is_valid() {
            return Err(RouteError::InvalidArgument(format!(
                "origin {} is not a valid coordinate",
                origin
            )));
        }
        if let Some((index, bad)) = destinations
            .iter()
            .enumerate()
            .find(|(_, position)| !position.is_valid())
        {
            return Err(RouteError::InvalidArgument(format!(
                "destination {} ({}) is not a valid coordinate",
                index, bad
            )));
        }

        Ok(Self {
            origin,
            destinations,
        })
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn destinations(&self) -> &[Position] {
        &self.destinations
    }

    /// Splits the destinations into the endpoint and the reorderable waypoints.
    ///
    /// A round trip ends at the origin and submits every destination as a
    /// waypoint. An open route ends at the last destination and submits the
    /// rest.
    pub fn plan(&self, return_to_origin: bool) -> RoutePlanShape<'_> {
        if return_to_origin {
            RoutePlanShape {
                endpoint: self.origin,
                waypoints: &self.destinations,
                fixed_tail: None,
            }
        } else {
            let (last, rest) = self
                .destinations
                .split_last()
                .map(|(last, rest)| (*last, rest))
                .unwrap_or((self.origin, &[][..]));
            RoutePlanShape {
                endpoint: last,
                waypoints: rest,
                fixed_tail: Some(last),
            }
        }
    }

    /// Query parameters for the provider, without the credential.
    pub fn query_params(
        &self,
        return_to_origin: bool,
        travel_mode: TravelMode,
    ) -> Vec<(&'static str, String)> {
        let shape = self.plan(return_to_origin);
        let mut params = vec![
            ("origin", self.origin.to_string()),
            ("destination", shape.endpoint.to_string()),
        ];

        if !shape.waypoints.is_empty() {
            let waypoints = shape
                .waypoints
                .iter()
                .map(Position::to_string)
                .collect::<Vec<_>>()
                .join("|");
            params.push(("waypoints", format!("{}|{}", OPTIMIZE_WAYPOINTS, waypoints)));
        }

        params.push(("mode", travel_mode.to_string()));
        params
    }
}

/// How a request maps onto the provider's origin/destination/waypoints model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePlanShape<'a> {
    pub endpoint: Position,
    /// Positions the provider may reorder; `waypoint_order` indexes this slice.
    pub waypoints: &'a [Position],
    /// A destination visited last regardless of the provider's order.
    pub fixed_tail: Option<Position>,
}
