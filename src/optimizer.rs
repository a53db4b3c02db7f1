//! Route optimization orchestration.
//!
//! One call issues one provider request, validates the reply and returns the
//! reordered stops with the decoded path. No caching, no retries.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::RouteError;
use crate::polyline::Polyline;
use crate::position::Position;
use crate::request::RouteRequest;
use crate::traits::DirectionsProvider;

/// Distance and duration of one leg, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegSummary {
    /// Meters.
    pub distance: u64,
    /// Seconds.
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedRoute {
    /// Total meters over all legs.
    pub distance: u64,
    /// Total seconds over all legs.
    pub duration: u64,
    pub path: Polyline,
    #[serde(skip)]
    pub legs: Vec<LegSummary>,
}

/// An optimized route together with the destinations in visiting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub route: OptimizedRoute,
    pub waypoints: Vec<Position>,
}

#[derive(Debug, Clone)]
pub struct RouteOptimizer<P> {
    provider: P,
}

impl<P: DirectionsProvider> RouteOptimizer<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Optimizes the visiting order of `destinations` starting from `origin`.
    ///
    /// Fails with [`RouteError::InvalidArgument`] before contacting the
    /// provider when `destinations` is empty.
    pub fn optimize_route(
        &self,
        origin: Position,
        destinations: &[Position],
    ) -> Result<RoutePlan, RouteError> {
        let request = RouteRequest::new(origin, destinations.to_vec())?;
        self.optimize(&request)
    }

    /// Runs an already validated request.
    pub fn optimize(&self, request: &RouteRequest) -> Result<RoutePlan, RouteError> {
        debug!(
            destinations = request.destinations().len(),
            "optimizing route"
        );

        let response = self.provider.directions(request)?;
        let plan = response.into_plan(request, self.provider.returns_to_origin())?;

        debug!(
            distance = plan.route.distance,
            duration = plan.route.duration,
            path_points = plan.route.path.len(),
            "route optimized"
        );
        Ok(plan)
    }
}

impl<P: DirectionsProvider + Sync> RouteOptimizer<P> {
    /// Optimizes independent requests in parallel; results keep input order.
    pub fn optimize_many(&self, requests: &[RouteRequest]) -> Vec<Result<RoutePlan, RouteError>> {
        requests
            .par_iter()
            .map(|request| self.optimize(request))
            .collect()
    }
}
