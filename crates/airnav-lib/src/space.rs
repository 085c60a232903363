//! Graph flavours.
//!
//! A [`Space`] fixes the identity type of nodes, the position type, and the
//! metric used both for planar segment costs and as the A* heuristic. The
//! graph store is generic over it, so the flavour is chosen when the store is
//! constructed rather than through a class hierarchy.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;

use crate::routing::RouteAlgorithm;

/// Mean Earth radius used for great-circle distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Flavour of a navigation graph.
pub trait Space: fmt::Debug + Clone + Copy + Default + 'static {
    /// Node identity.
    type Key: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display + FromStr + Serialize;
    /// Two-dimensional node position.
    type Position: Copy + fmt::Debug + fmt::Display + PartialEq + Serialize;

    /// Algorithm used when a caller does not ask for one explicitly.
    const DEFAULT_ALGORITHM: RouteAlgorithm;

    /// Short label used in logs and summaries.
    const LABEL: &'static str;

    /// Straight-line distance between two positions. Never overestimates the
    /// cost of a chain of segments whose costs are measured in the same metric.
    fn distance(a: &Self::Position, b: &Self::Position) -> f64;
}

/// Planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanarPosition {
    pub x: f64,
    pub y: f64,
}

impl PlanarPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for PlanarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Geographic coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in kilometres (haversine formula).
    pub fn distance_to(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Generic graph: string-named nodes on a plane, Euclidean costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Planar;

impl Space for Planar {
    type Key = String;
    type Position = PlanarPosition;

    const DEFAULT_ALGORITHM: RouteAlgorithm = RouteAlgorithm::AStar;
    const LABEL: &'static str = "planar";

    fn distance(a: &PlanarPosition, b: &PlanarPosition) -> f64 {
        a.distance_to(b)
    }
}

/// Airspace: numbered navigation points on the globe, costs in kilometres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aeronautical;

impl Space for Aeronautical {
    type Key = i64;
    type Position = GeoPosition;

    const DEFAULT_ALGORITHM: RouteAlgorithm = RouteAlgorithm::Dijkstra;
    const LABEL: &'static str = "aeronautical";

    fn distance(a: &GeoPosition, b: &GeoPosition) -> f64 {
        a.distance_to(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_is_euclidean() {
        let a = PlanarPosition::new(0.0, 0.0);
        let b = PlanarPosition::new(3.0, 4.0);
        assert!((Planar::distance(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn great_circle_distance_matches_known_pair() {
        // Barcelona (LEBL) to Madrid (LEMD) is roughly 483 km.
        let lebl = GeoPosition::new(41.2971, 2.0785);
        let lemd = GeoPosition::new(40.4719, -3.5626);
        let distance = Aeronautical::distance(&lebl, &lemd);
        assert!((distance - 483.0).abs() < 5.0, "got {distance}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = GeoPosition::new(0.0, 0.0);
        let b = GeoPosition::new(1.0, 0.0);
        assert!((a.distance_to(&b) - 111.19).abs() < 0.01);
    }

    #[test]
    fn positions_display_as_pairs() {
        assert_eq!(PlanarPosition::new(1.5, -2.0).to_string(), "(1.5, -2)");
        assert_eq!(GeoPosition::new(41.5, 2.25).to_string(), "(41.5, 2.25)");
    }
}
