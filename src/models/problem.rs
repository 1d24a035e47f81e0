//! Routing problem instance.

use super::{Location, Point};
use crate::distance::{CostMatrix, CostModel, GeoCost, Metric, TravelCost};
use crate::error::{Error, Result};

/// A validated single-depot routing instance: locations, their travel costs
/// and the depot.
///
/// Construction fails fast, before any search work: the depot must be a valid
/// index and there must be exactly one location per row of the cost model.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::CostMatrix;
/// use route_optimizer::models::Problem;
///
/// let matrix = CostMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0],
///     vec![2.0, 0.0, 6.0],
///     vec![9.0, 6.0, 0.0],
/// ])
/// .unwrap();
/// let problem = Problem::from_matrix(matrix.clone(), 0).unwrap();
/// assert_eq!(problem.size(), 3);
/// assert_eq!(problem.stops(), vec![1, 2]);
///
/// assert!(Problem::from_matrix(matrix, 3).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    locations: Vec<Location>,
    costs: CostModel,
    depot: usize,
}

impl Problem {
    /// Creates a problem from a cost model and one location per row.
    pub fn new(costs: impl Into<CostModel>, locations: Vec<Location>, depot: usize) -> Result<Self> {
        let costs = costs.into();
        let size = costs.size();
        if locations.len() != size {
            return Err(Error::malformed(format!(
                "{} location labels for a {size}x{size} cost table",
                locations.len()
            )));
        }
        if let Some((i, loc)) = locations
            .iter()
            .enumerate()
            .find(|(i, loc)| loc.index() != *i)
        {
            return Err(Error::malformed(format!(
                "location `{}` has index {} but sits at row {i}",
                loc.label(),
                loc.index()
            )));
        }
        Error::check_index(depot, size)?;
        Ok(Self {
            locations,
            costs,
            depot,
        })
    }

    /// Creates a problem over a cost matrix with index labels.
    pub fn from_matrix(matrix: CostMatrix, depot: usize) -> Result<Self> {
        let locations = Location::indexed(matrix.size());
        Self::new(matrix, locations, depot)
    }

    /// Creates a problem whose costs are distances between `points`.
    pub fn from_points(points: Vec<Point>, metric: Metric, depot: usize) -> Result<Self> {
        let locations = Location::indexed(points.len())
            .into_iter()
            .zip(&points)
            .map(|(loc, &p)| loc.with_point(p))
            .collect();
        let costs = GeoCost::new(points, metric)?;
        Self::new(costs, locations, depot)
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Depot location index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of locations, depot included.
    pub fn size(&self) -> usize {
        self.locations.len()
    }

    /// Delivery stops: every location except the depot, in index order.
    pub fn stops(&self) -> Vec<usize> {
        (0..self.size()).filter(|&i| i != self.depot).collect()
    }

    /// Label of the location at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn label(&self, index: usize) -> &str {
        self.locations[index].label()
    }

    /// Index of the first location carrying `label`.
    pub fn find_label(&self, label: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.label() == label)
    }
}
