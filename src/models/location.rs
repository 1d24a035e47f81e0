//! Location and coordinate types.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A point in the plane, or a longitude/latitude pair for great-circle use.
///
/// For geographic points `x` is the longitude and `y` the latitude, both in
/// degrees.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert!((a.euclidean(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a geographic point from latitude and longitude in degrees.
    pub fn from_lat_lng(lat: f64, lng: f64) -> Self {
        Self { x: lng, y: lat }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns `true` if this point is a valid latitude/longitude pair.
    pub fn is_geographic(&self) -> bool {
        self.is_finite() && (-90.0..=90.0).contains(&self.y) && (-180.0..=180.0).contains(&self.x)
    }

    /// Euclidean distance to another point.
    pub fn euclidean(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Great-circle distance in metres (haversine formula).
    pub fn haversine(&self, other: &Point) -> f64 {
        let (lat1, lat2) = (self.y.to_radians(), other.y.to_radians());
        let dlat = (other.y - self.y).to_radians();
        let dlng = (other.x - self.x).to_radians();
        let s1 = (dlat / 2.0).sin();
        let s2 = (dlng / 2.0).sin();
        let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
        2.0 * EARTH_RADIUS_M * h.sqrt().asin()
    }
}

/// A location that can be visited: the depot or a delivery stop.
///
/// The `index` is the row/column of this location in the cost table.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{Location, Point};
///
/// let depot = Location::new(0, "Warehouse").with_point(Point::new(35.0, 35.0));
/// assert_eq!(depot.index(), 0);
/// assert_eq!(depot.label(), "Warehouse");
/// assert!(depot.point().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    index: usize,
    label: String,
    point: Option<Point>,
}

impl Location {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            point: None,
        }
    }

    /// Creates locations labeled by their index (`"0"`, `"1"`, ...).
    pub fn indexed(count: usize) -> Vec<Location> {
        (0..count).map(|i| Location::new(i, i.to_string())).collect()
    }

    /// Attaches coordinates to this location.
    pub fn with_point(mut self, point: Point) -> Self {
        self.point = Some(point);
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn point(&self) -> Option<Point> {
        self.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert!((a.euclidean(&b) - 5.0).abs() < 1e-10);
        assert!((a.euclidean(&b) - b.euclidean(&a)).abs() < 1e-10);
        assert_eq!(a.euclidean(&a), 0.0);
    }

    #[test]
    fn test_euclidean_large_coordinates_stay_finite() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1e200, 0.0);
        assert_eq!(a.euclidean(&b), 1e200);
        let c = Point::new(3e200, 4e200);
        assert!((a.euclidean(&c) / 5e200 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_one_degree_of_latitude() {
        let a = Point::from_lat_lng(0.0, 0.0);
        let b = Point::from_lat_lng(1.0, 0.0);
        // One degree along a meridian is roughly 111.2 km.
        assert!((a.haversine(&b) - 111_195.0).abs() < 100.0);
        assert_eq!(a.haversine(&a), 0.0);
    }

    #[test]
    fn test_is_geographic() {
        assert!(Point::from_lat_lng(45.0, -120.0).is_geographic());
        assert!(!Point::from_lat_lng(91.0, 0.0).is_geographic());
        assert!(!Point::from_lat_lng(0.0, 181.0).is_geographic());
        assert!(!Point::new(f64::NAN, 0.0).is_geographic());
    }

    #[test]
    fn test_indexed_labels() {
        let locations = Location::indexed(3);
        assert_eq!(locations.len(), 3);
        assert_eq!(locations[2].label(), "2");
        assert_eq!(locations[2].index(), 2);
        assert!(locations[0].point().is_none());
    }
}
