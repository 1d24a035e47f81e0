//! Route type.

use serde::{Deserialize, Serialize};

/// A closed walk assigned to a single vehicle.
///
/// `stops` always begins and ends at the depot; the locations in between are
/// the visits. An idle vehicle has the route `[depot, depot]`.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Route;
///
/// let route = Route::new(0, 0, vec![1, 3, 2], 23.0);
/// assert_eq!(route.stops(), &[0, 1, 3, 2, 0]);
/// assert_eq!(route.visits(), &[1, 3, 2]);
/// assert_eq!(route.len(), 3);
///
/// let idle = Route::idle(1, 0);
/// assert_eq!(idle.stops(), &[0, 0]);
/// assert!(idle.is_empty());
/// ```
///
/// Deserialized routes are checked the same way: at least two stops, equal
/// first and last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RouteRecord")]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<usize>,
    distance: f64,
}

impl Route {
    /// Creates a route for `vehicle_id` visiting `visits` in order, bracketed
    /// by `depot`.
    pub fn new(vehicle_id: usize, depot: usize, visits: Vec<usize>, distance: f64) -> Self {
        let mut stops = Vec::with_capacity(visits.len() + 2);
        stops.push(depot);
        stops.extend(visits);
        stops.push(depot);
        Self {
            vehicle_id,
            stops,
            distance,
        }
    }

    /// Creates the route of a vehicle that never leaves the depot.
    pub fn idle(vehicle_id: usize, depot: usize) -> Self {
        Self::new(vehicle_id, depot, Vec::new(), 0.0)
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// The full closed walk, depot included at both ends.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Visited locations in order, depot excluded.
    pub fn visits(&self) -> &[usize] {
        &self.stops[1..self.stops.len() - 1]
    }

    pub fn depot(&self) -> usize {
        self.stops[0]
    }

    /// Number of visits (excluding the depot).
    pub fn len(&self) -> usize {
        self.stops.len() - 2
    }

    /// Returns `true` if the vehicle is idle.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consecutive `(from, to)` arcs of the closed walk, return arc included.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.stops.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total cost of the closed walk.
    pub fn distance(&self) -> f64 {
        self.distance
    }

}

#[derive(Deserialize)]
struct RouteRecord {
    vehicle_id: usize,
    stops: Vec<usize>,
    distance: f64,
}

impl TryFrom<RouteRecord> for Route {
    type Error = String;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        match record.stops.as_slice() {
            [first, .., last] if first == last => Ok(Self {
                vehicle_id: record.vehicle_id,
                stops: record.stops,
                distance: record.distance,
            }),
            _ => Err(format!(
                "route of vehicle {} must start and end at the depot, got {:?}",
                record.vehicle_id, record.stops
            )),
        }
    }
}
