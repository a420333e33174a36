//! Minimal environment interface the simulation core calls into.

use crate::node::Node;
use crate::types::{NodeId, Position2D};

/// The spatial world the nodes inhabit.
///
/// This is deliberately the narrow subset the action/reaction core needs:
/// position construction, node lookup, displacement, and neighborhood
/// queries. Neighbor semantics (radius, topology, wrapping) belong to the
/// concrete implementation.
pub trait Environment: Send {
    /// Constructs a position from raw coordinates.
    fn make_position(&self, x: f64, y: f64) -> Position2D;

    /// Returns the node with the given id, if it is in the environment.
    fn node(&self, id: NodeId) -> Option<&dyn Node>;

    /// Mutable access to the node with the given id.
    fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn Node>;

    /// Tests whether a node is currently in the environment.
    fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns a node's current position.
    fn position(&self, id: NodeId) -> Option<Position2D>;

    /// Displaces a node by `delta`. Returns false if the node is gone.
    fn move_node(&mut self, id: NodeId, delta: Position2D) -> bool;

    /// Returns the ids of the nodes spatially adjacent to `id`,
    /// excluding `id` itself. Empty if the node is gone.
    fn neighborhood(&self, id: NodeId) -> Vec<NodeId>;

    /// Adds a node at the given position.
    fn add_node(&mut self, node: Box<dyn Node>, position: Position2D);

    /// Removes a node. Returns false if it was not present.
    fn remove_node(&mut self, id: NodeId) -> bool;
}
