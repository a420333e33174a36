//! The petri-dish environment: a flat 2D plane with radius neighborhoods.

use std::collections::HashMap;
use vivarium_env::{Environment, Node, NodeId, Position2D};

/// Concrete environment for simulation runs.
///
/// Nodes live on an unbounded plane; two nodes are neighbors when their
/// Euclidean distance is within `neighbor_radius`.
pub struct DishEnvironment {
    nodes: HashMap<NodeId, Box<dyn Node>>,
    positions: HashMap<NodeId, Position2D>,
    neighbor_radius: f64,
}

impl DishEnvironment {
    /// Creates an empty dish with the given neighborhood radius.
    pub fn new(neighbor_radius: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            positions: HashMap::new(),
            neighbor_radius,
        }
    }

    /// Returns the number of nodes currently in the dish.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns all node ids in a stable (sorted) order.
    ///
    /// HashMap iteration order is not deterministic; anything that derives
    /// behavior from "all nodes" must go through this.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Returns the neighborhood radius.
    pub fn neighbor_radius(&self) -> f64 {
        self.neighbor_radius
    }
}

impl Environment for DishEnvironment {
    fn make_position(&self, x: f64, y: f64) -> Position2D {
        Position2D::new(x, y)
    }

    fn node(&self, id: NodeId) -> Option<&dyn Node> {
        self.nodes.get(&id).map(|n| n.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Node> {
        self.nodes.get_mut(&id).map(|n| &mut **n as &mut dyn Node)
    }

    fn position(&self, id: NodeId) -> Option<Position2D> {
        self.positions.get(&id).copied()
    }

    fn move_node(&mut self, id: NodeId, delta: Position2D) -> bool {
        match self.positions.get_mut(&id) {
            Some(position) => {
                *position += delta;
                true
            }
            None => false,
        }
    }

    fn neighborhood(&self, id: NodeId) -> Vec<NodeId> {
        let center = match self.positions.get(&id) {
            Some(p) => *p,
            None => return Vec::new(),
        };
        self.positions
            .iter()
            .filter(|(other, p)| **other != id && (*p - center).norm() <= self.neighbor_radius)
            .map(|(other, _)| *other)
            .collect()
    }

    fn add_node(&mut self, node: Box<dyn Node>, position: Position2D) {
        let id = node.id();
        self.positions.insert(id, position);
        self.nodes.insert(id, node);
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        self.positions.remove(&id);
        self.nodes.remove(&id).is_some()
    }
}
