//! Translation between solver nodes and domain locations.

use crate::error::{Error, Result};

/// Index of a node in the solver's internal node space.
pub type NodeIndex = usize;

/// Bidirectional map between the solver node space and location indices.
///
/// The node space is laid out as:
///
/// ```text
/// [0, T)          travel nodes, one per non-depot location (ascending)
/// [T, T + K)      start node of each vehicle
/// [T + K, T + 2K) end node of each vehicle
/// ```
///
/// where `T = locations - 1` and `K` is the fleet size. Start and end nodes
/// all map to the depot; the depot itself has no travel node.
///
/// # Examples
///
/// ```
/// use route_optimizer::assignment::IndexMap;
///
/// // 4 locations, depot 2, 2 vehicles
/// let map = IndexMap::new(4, 2, 2).unwrap();
/// assert_eq!(map.num_travel_nodes(), 3);
/// assert_eq!(map.to_location(0), 0);
/// assert_eq!(map.to_location(2), 3);
/// assert_eq!(map.to_node(3), Some(2));
/// assert_eq!(map.to_node(2), None);
/// assert_eq!(map.to_location(map.start(1)), 2);
/// assert_eq!(map.to_location(map.end(0)), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    depot: usize,
    num_vehicles: usize,
    node_to_location: Vec<usize>,
    location_to_node: Vec<Option<NodeIndex>>,
}

impl IndexMap {
    /// Builds the node space for `num_locations` locations, a depot and a
    /// fleet of `num_vehicles`.
    ///
    /// Fails with [`Error::InvalidIndex`] if the depot is out of bounds.
    pub fn new(num_locations: usize, depot: usize, num_vehicles: usize) -> Result<Self> {
        Error::check_index(depot, num_locations)?;

        let travel = num_locations - 1;
        let mut node_to_location = Vec::with_capacity(travel + 2 * num_vehicles);
        let mut location_to_node = vec![None; num_locations];

        for location in (0..num_locations).filter(|&l| l != depot) {
            location_to_node[location] = Some(node_to_location.len());
            node_to_location.push(location);
        }
        node_to_location.extend(std::iter::repeat(depot).take(2 * num_vehicles));

        Ok(Self {
            depot,
            num_vehicles,
            node_to_location,
            location_to_node,
        })
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Total number of solver nodes.
    pub fn num_nodes(&self) -> usize {
        self.node_to_location.len()
    }

    /// Number of travel nodes (non-depot locations).
    pub fn num_travel_nodes(&self) -> usize {
        self.node_to_location.len() - 2 * self.num_vehicles
    }

    /// Travel nodes in ascending order.
    pub fn travel_nodes(&self) -> std::ops::Range<NodeIndex> {
        0..self.num_travel_nodes()
    }

    /// Start node of `vehicle`.
    pub fn start(&self, vehicle: usize) -> NodeIndex {
        debug_assert!(vehicle < self.num_vehicles);
        self.num_travel_nodes() + vehicle
    }

    /// End node of `vehicle`.
    pub fn end(&self, vehicle: usize) -> NodeIndex {
        debug_assert!(vehicle < self.num_vehicles);
        self.num_travel_nodes() + self.num_vehicles + vehicle
    }

    pub fn is_travel(&self, node: NodeIndex) -> bool {
        node < self.num_travel_nodes()
    }

    pub fn is_start(&self, node: NodeIndex) -> bool {
        (self.num_travel_nodes()..self.num_travel_nodes() + self.num_vehicles).contains(&node)
    }

    pub fn is_end(&self, node: NodeIndex) -> bool {
        (self.num_travel_nodes() + self.num_vehicles..self.num_nodes()).contains(&node)
    }

    /// Location a node stands for.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the node space.
    pub fn to_location(&self, node: NodeIndex) -> usize {
        self.node_to_location[node]
    }

    /// Travel node of a location; `None` for the depot or an unknown location.
    pub fn to_node(&self, location: usize) -> Option<NodeIndex> {
        self.location_to_node.get(location).copied().flatten()
    }

    /// Translates a node path into location indices.
    pub fn to_locations(&self, path: &[NodeIndex]) -> Vec<usize> {
        path.iter().map(|&n| self.to_location(n)).collect()
    }
}
