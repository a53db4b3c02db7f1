//! route-optimizer
//!
//! Waypoint-optimized routing through an external directions provider, with
//! a strict codec for the provider's encoded polyline geometry.

pub mod api;
pub mod config;
pub mod directions;
pub mod error;
pub mod optimizer;
pub mod polyline;
pub mod position;
pub mod request;
pub mod response;
pub mod traits;

pub use config::DirectionsConfig;
pub use directions::DirectionsClient;
pub use error::{ConfigError, ErrorKind, RouteError};
pub use optimizer::{LegSummary, OptimizedRoute, RouteOptimizer, RoutePlan};
pub use polyline::{Polyline, PolylineError};
pub use position::Position;
pub use request::RouteRequest;
pub use traits::DirectionsProvider;
