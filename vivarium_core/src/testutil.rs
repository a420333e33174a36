//! Minimal in-memory environment and node types for core tests.

use crate::action::{Action, ActionError};
use crate::context::Context;
use crate::randomizable::Randomizable;
use std::collections::HashMap;
use vivarium_env::{Environment, Node, NodeId, Polarizable, Position2D, ReactionId, SharedRng};

/// A test cell: receives polarization vectors by overwrite.
pub struct TestCell {
    id: NodeId,
    polarization: Position2D,
}

impl Polarizable for TestCell {
    fn add_polarization(&mut self, versor: Position2D) {
        self.polarization = versor;
    }

    fn polarization(&self) -> Position2D {
        self.polarization
    }
}

impl Node for TestCell {
    fn id(&self) -> NodeId {
        self.id
    }

    fn polarizable(&self) -> Option<&dyn Polarizable> {
        Some(self)
    }

    fn polarizable_mut(&mut self) -> Option<&mut dyn Polarizable> {
        Some(self)
    }
}

/// A test node with no capabilities beyond existing.
pub struct TestParticle {
    id: NodeId,
}

impl Node for TestParticle {
    fn id(&self) -> NodeId {
        self.id
    }
}

/// In-memory environment with neighborhood-by-radius.
pub struct TestEnv {
    nodes: HashMap<NodeId, Box<dyn Node>>,
    positions: HashMap<NodeId, Position2D>,
    neighbor_radius: f64,
    next_seed: u64,
}

impl TestEnv {
    pub fn new(neighbor_radius: f64) -> Self {
        Self {
            nodes: HashMap::new(),
            positions: HashMap::new(),
            neighbor_radius,
            next_seed: 0,
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId::from_seed(self.next_seed);
        self.next_seed += 1;
        id
    }

    pub fn add_cell_at(&mut self, x: f64, y: f64) -> NodeId {
        let id = self.next_id();
        self.add_node(
            Box::new(TestCell {
                id,
                polarization: Position2D::new(0.0, 0.0),
            }),
            Position2D::new(x, y),
        );
        id
    }

    pub fn add_particle_at(&mut self, x: f64, y: f64) -> NodeId {
        let id = self.next_id();
        self.add_node(Box::new(TestParticle { id }), Position2D::new(x, y));
        id
    }
}

impl Environment for TestEnv {
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

/// A do-nothing action with GLOBAL scope, for context/scheduling tests.
pub struct GlobalStir {
    base: Randomizable,
}

impl GlobalStir {
    pub fn new(owner: NodeId, rng: SharedRng) -> Self {
        Self {
            base: Randomizable::new(owner, rng),
        }
    }
}

impl Action for GlobalStir {
    fn execute(&mut self, env: &mut dyn Environment) -> Result<(), ActionError> {
        let owner = self.base.owner();
        if !env.contains(owner) {
            return Err(ActionError::unavailable(owner));
        }
        Ok(())
    }

    fn context(&self) -> Context {
        Context::Global
    }

    fn owner(&self) -> NodeId {
        self.base.owner()
    }

    fn clone_for(
        &self,
        _env: &dyn Environment,
        node: NodeId,
        _reaction: ReactionId,
    ) -> Result<Box<dyn Action>, ActionError> {
        Ok(Box::new(Self::new(node, self.base.rng().clone())))
    }
}
