//! Waste collection stops used across the route optimizer tests.

use route_optimizer::Position;

/// A named collection stop.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lng)
    }
}

pub const DEPOT: Location = Location::new("Sanitation Depot", 40.7794, -73.9632);

pub const TODAY: &[Location] = &[
    Location::new("Central District", 40.785091, -73.968285),
    Location::new("Westside Residential", 40.775091, -73.978285),
    Location::new("Downtown Commercial", 40.765091, -73.988285),
];

pub const TOMORROW: &[Location] = &[
    Location::new("South Park Area", 40.755091, -73.968285),
    Location::new("North District", 40.795091, -73.958285),
    Location::new("Eastside Residential", 40.765091, -73.948285),
];

pub fn positions(locations: &[Location]) -> Vec<Position> {
    locations.iter().map(Location::position).collect()
}
