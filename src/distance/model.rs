//! The cost model abstraction shared by every search component.

use super::{CostMatrix, GeoCost};
use crate::error::{Error, Result};

/// Pairwise travel cost between locations `0..size()`.
///
/// Implementations are pure: the same pair always yields the same cost.
pub trait TravelCost: Send + Sync {
    /// Number of locations.
    fn size(&self) -> usize;

    /// Cost of the arc `from → to` without bounds checking.
    ///
    /// Callers must have validated both indices against [`size`](Self::size).
    fn arc(&self, from: usize, to: usize) -> f64;

    /// Cost of the arc `from → to`.
    ///
    /// Fails with [`Error::InvalidIndex`] if either index is out of bounds.
    fn cost(&self, from: usize, to: usize) -> Result<f64> {
        Error::check_index(from, self.size())?;
        Error::check_index(to, self.size())?;
        Ok(self.arc(from, to))
    }

    /// Returns the position in `candidates` of the cheapest finite arc from
    /// `from`, together with its cost.
    ///
    /// Ties go to the earliest candidate. Returns `None` if no candidate is
    /// reachable at finite cost.
    fn nearest(&self, from: usize, candidates: &[usize]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, &to) in candidates.iter().enumerate() {
            let c = self.arc(from, to);
            if !c.is_finite() {
                continue;
            }
            match best {
                Some((_, b)) if c >= b => {}
                _ => best = Some((pos, c)),
            }
        }
        best
    }

    /// Returns `true` if `arc(a, b) == arc(b, a)` for every pair.
    fn is_symmetric(&self) -> bool {
        let n = self.size();
        (0..n).all(|a| ((a + 1)..n).all(|b| self.arc(a, b) == self.arc(b, a)))
    }
}

/// Where travel costs come from: a preloaded table or point geometry.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::{CostMatrix, CostModel, TravelCost};
///
/// let model = CostModel::from(CostMatrix::from_rows(vec![
///     vec![0.0, 4.0],
///     vec![4.0, 0.0],
/// ]).unwrap());
/// assert_eq!(model.cost(0, 1).unwrap(), 4.0);
/// assert!(model.cost(0, 2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CostModel {
    Matrix(CostMatrix),
    Geometry(GeoCost),
}

impl CostModel {
    /// Returns the backing matrix, computing it for geometry models.
    pub fn to_matrix(&self) -> Result<CostMatrix> {
        match self {
            Self::Matrix(m) => Ok(m.clone()),
            Self::Geometry(g) => g.to_matrix(),
        }
    }
}

impl From<CostMatrix> for CostModel {
    fn from(matrix: CostMatrix) -> Self {
        Self::Matrix(matrix)
    }
}

impl From<GeoCost> for CostModel {
    fn from(geo: GeoCost) -> Self {
        Self::Geometry(geo)
    }
}

impl TravelCost for CostMatrix {
    fn size(&self) -> usize {
        CostMatrix::size(self)
    }

    fn arc(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }
}

impl TravelCost for GeoCost {
    fn size(&self) -> usize {
        self.len()
    }

    fn arc(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to)
    }

    fn is_symmetric(&self) -> bool {
        true
    }
}

impl TravelCost for CostModel {
    fn size(&self) -> usize {
        match self {
            Self::Matrix(m) => TravelCost::size(m),
            Self::Geometry(g) => TravelCost::size(g),
        }
    }

    fn arc(&self, from: usize, to: usize) -> f64 {
        match self {
            Self::Matrix(m) => m.arc(from, to),
            Self::Geometry(g) => g.arc(from, to),
        }
    }

    fn is_symmetric(&self) -> bool {
        match self {
            Self::Matrix(m) => TravelCost::is_symmetric(m),
            Self::Geometry(g) => TravelCost::is_symmetric(g),
        }
    }
}
