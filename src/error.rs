//! Crate-wide error type.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The cost table is not square or holds unusable entries.
    #[error("malformed matrix: {0}")]
    MalformedMatrix(String),
    /// A depot or location index lies outside `0..size`.
    #[error("index {index} is out of bounds for {size} locations")]
    InvalidIndex { index: usize, size: usize },
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("invalid fleet size {requested}: expected 1..={max} vehicles")]
    InvalidFleet { requested: usize, max: usize },
    #[error("unknown location `{0}`")]
    UnknownLabel(String),
    /// The search could not complete the partition.
    #[error("no feasible solution: {unassigned} location(s) could not be routed")]
    NoFeasibleSolution { unassigned: usize },
    /// A search state does not belong to the assigner it was handed to.
    #[error("invalid search state: {0}")]
    InvalidState(String),
    #[error("search cancelled after {assigned} assignment(s)")]
    Cancelled { assigned: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedMatrix(message.into())
    }

    pub fn invalid_coordinates(message: impl Into<String>) -> Self {
        Self::InvalidCoordinates(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Returns an [`Error::InvalidIndex`] unless `index < size`.
    pub(crate) fn check_index(index: usize, size: usize) -> Result<()> {
        if index < size {
            Ok(())
        } else {
            Err(Self::InvalidIndex { index, size })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(Error::check_index(2, 3).is_ok());
        assert!(matches!(
            Error::check_index(3, 3),
            Err(Error::InvalidIndex { index: 3, size: 3 })
        ));
    }

    #[test]
    fn test_messages() {
        let e = Error::malformed("matrix must be square");
        assert_eq!(e.to_string(), "malformed matrix: matrix must be square");
        let e = Error::InvalidFleet {
            requested: 11,
            max: 10,
        };
        assert_eq!(e.to_string(), "invalid fleet size 11: expected 1..=10 vehicles");
    }
}
