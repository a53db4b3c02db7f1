//! Core seams of the route optimizer.
//!
//! The optimizer only needs one external capability: turning a route request
//! into the provider's raw directions reply. Implement [`DirectionsProvider`]
//! to plug in another transport or a test double.

use crate::error::RouteError;
use crate::request::RouteRequest;
use crate::response::DirectionsResponse;

/// Fetches waypoint-optimized directions for a request.
///
/// Implementations perform exactly one provider call and report transport
/// failures as [`RouteError::Transport`]. Interpreting the reply (status,
/// waypoint order, polyline) is left to the optimizer.
pub trait DirectionsProvider {
    /// Whether requests end back at the origin. Decides which destinations
    /// the provider's `waypoint_order` refers to, so it must agree with the
    /// query the implementation actually sends.
    fn returns_to_origin(&self) -> bool;

    fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, RouteError>;
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for &P {
    fn returns_to_origin(&self) -> bool {
        (**self).returns_to_origin()
    }

    fn directions(&self, request: &RouteRequest) -> Result<DirectionsResponse, RouteError> {
        (**self).directions(request)
    }
}
