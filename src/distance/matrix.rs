//! Dense cost matrix.

use crate::error::{Error, Result};

/// A dense n×n travel-cost matrix stored in row-major order.
///
/// Entries are non-negative; `+∞` marks an arc that cannot be used. NaN and
/// negative entries are rejected at construction. The matrix need not be
/// symmetric and is never mutated once built.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::CostMatrix;
///
/// let dm = CostMatrix::from_rows(vec![
///     vec![0.0, 5.0],
///     vec![7.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.get(1, 0), 7.0);
/// assert_eq!(dm.size(), 2);
///
/// assert!(CostMatrix::from_rows(vec![vec![0.0, 1.0]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix from explicit rows.
    ///
    /// Fails with [`Error::MalformedMatrix`] if the rows do not form a square
    /// table or an entry is NaN or negative.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::malformed(format!(
                    "matrix must be square: row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Self::from_data(size, data)
    }

    /// Creates a matrix from a row-major grid of `size * size` entries.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(Error::malformed(format!(
                "{} entries cannot form a {size}x{size} matrix",
                data.len()
            )));
        }
        for (k, &value) in data.iter().enumerate() {
            check_entry(k / size.max(1), k % size.max(1), value)?;
        }
        Ok(Self { data, size })
    }

    /// Builds a matrix by evaluating `cost(from, to)` for every pair.
    pub fn from_fn(size: usize, mut cost: impl FnMut(usize, usize) -> f64) -> Result<Self> {
        let mut data = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                data.push(cost(i, j));
            }
        }
        Self::from_data(size, data)
    }

    /// Returns the cost from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Row of costs leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a != b && (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every diagonal entry is zero.
    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.size).all(|i| self.get(i, i) == 0.0)
    }
}

fn check_entry(row: usize, col: usize, value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(Error::malformed(format!("entry ({row}, {col}) is NaN")));
    }
    if value < 0.0 {
        return Err(Error::malformed(format!(
            "entry ({row}, {col}) is negative: {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![2.0, 0.0, 6.0, 4.0],
            vec![9.0, 6.0, 0.0, 8.0],
            vec![10.0, 4.0, 8.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_from_rows() {
        let dm = sample();
        assert_eq!(dm.size(), 4);
        assert_eq!(dm.get(1, 3), 4.0);
        assert_eq!(dm.row(2), &[9.0, 6.0, 0.0, 8.0]);
        assert!(dm.has_zero_diagonal());
    }

    #[test]
    fn test_symmetric() {
        assert!(sample().is_symmetric(1e-10));
        let asym = CostMatrix::from_rows(vec![vec![0.0, 10.0], vec![15.0, 0.0]]).expect("valid");
        assert!(!asym.is_symmetric(1e-10));
    }

    #[test]
    fn test_not_square() {
        let err = CostMatrix::from_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 3.0]]);
        assert!(matches!(err, Err(Error::MalformedMatrix(_))));
    }

    #[test]
    fn test_from_data_invalid_size() {
        assert!(CostMatrix::from_data(2, vec![0.0, 1.0, 2.0]).is_err());
    }

    #[test]
    fn test_rejects_nan_and_negative() {
        assert!(CostMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]).is_err());
        assert!(CostMatrix::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]).is_err());
        assert!(
            CostMatrix::from_rows(vec![vec![0.0, f64::NEG_INFINITY], vec![1.0, 0.0]]).is_err()
        );
    }

    #[test]
    fn test_accepts_infinite_arc() {
        let dm = CostMatrix::from_rows(vec![vec![0.0, f64::INFINITY], vec![1.0, 0.0]])
            .expect("valid");
        assert!(dm.get(0, 1).is_infinite());
        assert!(!dm.is_symmetric(0.0));
    }

    #[test]
    fn test_empty_matrix() {
        let dm = CostMatrix::from_rows(Vec::new()).expect("valid");
        assert_eq!(dm.size(), 0);
    }

    #[test]
    fn test_from_fn() {
        let dm = CostMatrix::from_fn(3, |i, j| (i as f64 - j as f64).abs()).expect("valid");
        assert_eq!(dm.get(0, 2), 2.0);
        assert_eq!(dm.get(2, 1), 1.0);
    }
}
