//! Mutable state of one assignment run.

use super::{IndexMap, NodeIndex};

/// Everything a single cheapest-arc run mutates: which travel nodes are
/// visited, each vehicle's partial path and its accumulated cost.
///
/// A state is created per run and handed to the assigner by value, so
/// independent runs never share mutable data.
#[derive(Debug, Clone)]
pub struct SearchState {
    visited: Vec<bool>,
    paths: Vec<Vec<NodeIndex>>,
    costs: Vec<f64>,
    closed: Vec<bool>,
    remaining: usize,
    steps: usize,
}

impl SearchState {
    /// Creates the initial state: every vehicle sits on its start node and no
    /// travel node is visited.
    pub fn new(map: &IndexMap) -> Self {
        let vehicles = map.num_vehicles();
        Self {
            visited: vec![false; map.num_travel_nodes()],
            paths: (0..vehicles).map(|v| vec![map.start(v)]).collect(),
            costs: vec![0.0; vehicles],
            closed: vec![false; vehicles],
            remaining: map.num_travel_nodes(),
            steps: 0,
        }
    }

    pub fn num_vehicles(&self) -> usize {
        self.paths.len()
    }

    /// Size of the travel-node space this state was built for.
    pub fn num_travel_nodes(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, node: NodeIndex) -> bool {
        self.visited[node]
    }

    /// Travel nodes still unassigned.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Number of assignments made so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Current tour end of `vehicle`.
    pub fn tail(&self, vehicle: usize) -> NodeIndex {
        // Paths always hold at least the start node.
        self.paths[vehicle][self.paths[vehicle].len() - 1]
    }

    /// Cost accumulated by `vehicle` so far.
    pub fn cost(&self, vehicle: usize) -> f64 {
        self.costs[vehicle]
    }

    /// Number of travel nodes on `vehicle`'s path.
    pub fn path_len(&self, vehicle: usize) -> usize {
        self.paths[vehicle].len() - 1 - usize::from(self.closed[vehicle])
    }

    /// Appends travel node `node` to `vehicle`'s path via an arc of cost `arc`.
    pub fn assign(&mut self, vehicle: usize, node: NodeIndex, arc: f64) {
        debug_assert!(!self.visited[node], "node {node} assigned twice");
        debug_assert!(!self.closed[vehicle]);
        self.visited[node] = true;
        self.paths[vehicle].push(node);
        self.costs[vehicle] += arc;
        self.remaining -= 1;
        self.steps += 1;
    }

    /// Closes `vehicle`'s path on its end node via an arc of cost `arc`.
    pub fn close(&mut self, vehicle: usize, end: NodeIndex, arc: f64) {
        debug_assert!(!self.closed[vehicle]);
        self.paths[vehicle].push(end);
        self.costs[vehicle] += arc;
        self.closed[vehicle] = true;
    }

    /// Unvisited travel nodes in ascending order.
    pub fn unvisited(&self) -> Vec<NodeIndex> {
        (0..self.visited.len()).filter(|&n| !self.visited[n]).collect()
    }

    /// Consumes the state, returning each vehicle's node path and cost.
    pub fn into_paths(self) -> Vec<(Vec<NodeIndex>, f64)> {
        self.paths.into_iter().zip(self.costs).collect()
    }
}
