//! Synthetic instances for demos and tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::{CostMatrix, GeoCost, Metric};
use crate::error::Result;
use crate::io::LabeledMatrix;
use crate::models::Point;

/// Side of the square the random points are drawn from.
pub const DEFAULT_EXTENT: f64 = 100.0;

/// Draws `count` points uniformly from `[0, extent)²`.
///
/// The same `seed` always yields the same points.
pub fn random_points(count: usize, seed: u64, extent: f64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
        .collect()
}

/// A symmetric instance of `count` locations with rounded Euclidean costs.
///
/// Location 0 is labeled `Depot`, the others `Stop 1`, `Stop 2`, and so on.
///
/// # Examples
///
/// ```
/// use route_optimizer::demo::random_instance;
///
/// let instance = random_instance(5, 42).unwrap();
/// assert_eq!(instance.labels[0], "Depot");
/// assert_eq!(instance.labels[4], "Stop 4");
/// assert!(instance.matrix.is_symmetric(0.0));
/// ```
pub fn random_instance(count: usize, seed: u64) -> Result<LabeledMatrix> {
    let points = random_points(count, seed, DEFAULT_EXTENT);
    let geo = GeoCost::new(points, Metric::Euclidean)?;
    let matrix = CostMatrix::from_fn(count, |i, j| geo.distance(i, j).round())?;
    let labels = (0..count)
        .map(|i| {
            if i == 0 {
                "Depot".to_string()
            } else {
                format!("Stop {i}")
            }
        })
        .collect();
    Ok(LabeledMatrix { labels, matrix })
}
