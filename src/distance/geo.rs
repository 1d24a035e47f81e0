//! Coordinate-based travel costs.

use serde::{Deserialize, Serialize};

use super::CostMatrix;
use crate::error::{Error, Result};
use crate::models::Point;

/// Distance formula used by a [`GeoCost`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Straight-line distance in the plane.
    #[default]
    Euclidean,
    /// Great-circle distance in metres; points are longitude/latitude.
    Haversine,
}

/// Travel costs computed on demand from point coordinates.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::{GeoCost, Metric};
/// use route_optimizer::models::Point;
///
/// let geo = GeoCost::new(
///     vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)],
///     Metric::Euclidean,
/// )
/// .unwrap();
/// assert!((geo.distance(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(geo.distance(1, 1), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCost {
    points: Vec<Point>,
    metric: Metric,
}

impl GeoCost {
    /// Creates a geometry-backed cost model.
    ///
    /// Fails with [`Error::InvalidCoordinates`] for non-finite coordinates, or
    /// for latitude/longitude out of range under [`Metric::Haversine`].
    pub fn new(points: Vec<Point>, metric: Metric) -> Result<Self> {
        for (i, p) in points.iter().enumerate() {
            let valid = match metric {
                Metric::Euclidean => p.is_finite(),
                Metric::Haversine => p.is_geographic(),
            };
            if !valid {
                return Err(Error::invalid_coordinates(format!(
                    "point {i} ({}, {}) is not valid for {metric:?} distance",
                    p.x, p.y
                )));
            }
        }
        Ok(Self { points, metric })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance between points `a` and `b`; zero when `a == b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        if a == b {
            return 0.0;
        }
        let (p, q) = (&self.points[a], &self.points[b]);
        match self.metric {
            Metric::Euclidean => p.euclidean(q),
            Metric::Haversine => p.haversine(q),
        }
    }

    /// Precomputes every pairwise distance into a matrix.
    pub fn to_matrix(&self) -> Result<CostMatrix> {
        CostMatrix::from_fn(self.len(), |a, b| self.distance(a, b))
    }
}
