//! Solver configuration.
//!
//! [`SolverConfig`] gathers every run parameter. It can be built in code with
//! the `with_*` methods or loaded from JSON:
//!
//! ```json
//! { "vehicles": 3, "depot": "Depot", "strategy": "cheapest-arc" }
//! ```
//!
//! Missing fields take their defaults; unknown fields are rejected.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constructive::ConstructionStrategy;
use crate::error::{Error, Result};
use crate::io::MatrixFormat;
use crate::models::{Fleet, Location, DEFAULT_MAX_VEHICLES};

/// How the depot is named: by row index or by location label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepotRef {
    Index(usize),
    Label(String),
}

impl Default for DepotRef {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl FromStr for DepotRef {
    type Err = std::convert::Infallible;

    /// Command-line depots are labels first; [`DepotRef::resolve`] falls
    /// back to reading them as indices.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::Label(s.to_string()))
    }
}

impl fmt::Display for DepotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl DepotRef {
    /// Resolves to a location index.
    ///
    /// A label matching a location wins; otherwise a label that parses as an
    /// integer is used as an index. Indices are bounds-checked.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_optimizer::config::DepotRef;
    /// use route_optimizer::models::Location;
    ///
    /// let locations = vec![Location::new(0, "Hub"), Location::new(1, "Shop")];
    /// assert_eq!(DepotRef::Label("Shop".into()).resolve(&locations).unwrap(), 1);
    /// assert_eq!(DepotRef::Label("1".into()).resolve(&locations).unwrap(), 1);
    /// assert!(DepotRef::Index(2).resolve(&locations).is_err());
    /// assert!(DepotRef::Label("Mall".into()).resolve(&locations).is_err());
    /// ```
    pub fn resolve(&self, locations: &[Location]) -> Result<usize> {
        match self {
            Self::Index(index) => {
                Error::check_index(*index, locations.len())?;
                Ok(*index)
            }
            Self::Label(label) => {
                if let Some(found) = locations.iter().find(|l| l.label() == label) {
                    return Ok(found.index());
                }
                match label.parse::<usize>() {
                    Ok(index) => Self::Index(index).resolve(locations),
                    Err(_) => Err(Error::UnknownLabel(label.clone())),
                }
            }
        }
    }
}

/// Fleet-level search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Cheapest-arc extension across all vehicles.
    #[default]
    CheapestArc,
    /// Nearest-neighbor giant tour split across vehicles.
    NearestNeighbor,
    /// Index-order giant tour split across vehicles.
    Sequential,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::CheapestArc => "cheapest-arc",
            Self::NearestNeighbor => "nearest-neighbor",
            Self::Sequential => "sequential",
        }
    }

    /// Tour constructor behind a giant-tour strategy, `None` for cheapest-arc.
    pub fn construction(self) -> Option<ConstructionStrategy> {
        match self {
            Self::CheapestArc => None,
            Self::NearestNeighbor => Some(ConstructionStrategy::NearestNeighbor),
            Self::Sequential => Some(ConstructionStrategy::Sequential),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for a [`Solver`](crate::solver::Solver) run.
///
/// # Examples
///
/// ```
/// use route_optimizer::config::{SolverConfig, Strategy};
///
/// let config = SolverConfig::from_json_str(r#"{ "vehicles": 3, "improve": true }"#).unwrap();
/// assert_eq!(config.vehicles, 3);
/// assert_eq!(config.max_vehicles, 10);
/// assert_eq!(config.strategy, Strategy::CheapestArc);
/// assert!(config.improve);
///
/// assert!(SolverConfig::default().with_vehicles(11).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Fleet size K.
    pub vehicles: usize,
    /// Upper bound on K.
    pub max_vehicles: usize,
    pub depot: DepotRef,
    pub strategy: Strategy,
    /// Runs intra-route 2-opt after construction.
    pub improve: bool,
    pub matrix_format: MatrixFormat,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            vehicles: 1,
            max_vehicles: DEFAULT_MAX_VEHICLES,
            depot: DepotRef::default(),
            strategy: Strategy::default(),
            improve: false,
            matrix_format: MatrixFormat::default(),
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Checks the fleet bounds and returns the fleet.
    pub fn validate(&self) -> Result<Fleet> {
        Fleet::with_max(self.vehicles, self.max_vehicles)
    }

    pub fn with_vehicles(mut self, vehicles: usize) -> Self {
        self.vehicles = vehicles;
        self
    }

    pub fn with_max_vehicles(mut self, max_vehicles: usize) -> Self {
        self.max_vehicles = max_vehicles;
        self
    }

    pub fn with_depot(mut self, depot: DepotRef) -> Self {
        self.depot = depot;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_improve(mut self, improve: bool) -> Self {
        self.improve = improve;
        self
    }

    pub fn with_matrix_format(mut self, format: MatrixFormat) -> Self {
        self.matrix_format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations() -> Vec<Location> {
        vec![
            Location::new(0, "Depot"),
            Location::new(1, "2"),
            Location::new(2, "Market"),
        ]
    }

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.vehicles, 1);
        assert_eq!(config.max_vehicles, 10);
        assert_eq!(config.depot, DepotRef::Index(0));
        assert_eq!(config.strategy, Strategy::CheapestArc);
        assert!(!config.improve);
        assert_eq!(config.matrix_format, MatrixFormat::Auto);
        assert_eq!(config.validate().expect("valid").size(), 1);
    }

    #[test]
    fn test_json_depot_forms() {
        let by_index = SolverConfig::from_json_str(r#"{ "depot": 2 }"#).expect("valid");
        assert_eq!(by_index.depot, DepotRef::Index(2));
        let by_label = SolverConfig::from_json_str(r#"{ "depot": "Market" }"#).expect("valid");
        assert_eq!(by_label.depot, DepotRef::Label("Market".into()));
    }

    #[test]
    fn test_json_enums() {
        let config = SolverConfig::from_json_str(
            r#"{ "strategy": "nearest-neighbor", "matrix_format": "raw" }"#,
        )
        .expect("valid");
        assert_eq!(config.strategy, Strategy::NearestNeighbor);
        assert_eq!(config.matrix_format, MatrixFormat::Raw);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            SolverConfig::from_json_str(r#"{ "trucks": 3 }"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_validate_fleet() {
        assert!(matches!(
            SolverConfig::default().with_vehicles(0).validate(),
            Err(Error::InvalidFleet { requested: 0, max: 10 })
        ));
        let config = SolverConfig::default().with_vehicles(15).with_max_vehicles(20);
        assert_eq!(config.validate().expect("valid").size(), 15);
    }

    #[test]
    fn test_resolve_label_before_index() {
        let locs = locations();
        // "2" names location 1, not index 2.
        assert_eq!(DepotRef::Label("2".into()).resolve(&locs).expect("valid"), 1);
        assert_eq!(DepotRef::Label("Depot".into()).resolve(&locs).expect("valid"), 0);
        assert_eq!(DepotRef::Label("0".into()).resolve(&locs).expect("valid"), 0);
    }

    #[test]
    fn test_resolve_errors() {
        let locs = locations();
        assert!(matches!(
            DepotRef::Label("Harbor".into()).resolve(&locs),
            Err(Error::UnknownLabel(label)) if label == "Harbor"
        ));
        assert!(matches!(
            DepotRef::Label("3".into()).resolve(&locs),
            Err(Error::InvalidIndex { index: 3, size: 3 })
        ));
    }

    #[test]
    fn test_strategy_construction() {
        assert_eq!(Strategy::CheapestArc.construction(), None);
        assert_eq!(
            Strategy::Sequential.construction(),
            Some(ConstructionStrategy::Sequential)
        );
        assert_eq!(Strategy::NearestNeighbor.to_string(), "nearest-neighbor");
    }
}
