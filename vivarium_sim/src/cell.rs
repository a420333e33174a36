//! Concrete node types for the harness.

use vivarium_env::{Node, NodeId, Polarizable, Position2D};

/// A cell: the polarizable node type.
///
/// Polarization merges by accumulation: the incoming versor is added to
/// the current polarization and the sum is renormalized when nonzero, so
/// repeated firings bias the cell without growing the vector unboundedly.
pub struct CellNode {
    id: NodeId,
    polarization: Position2D,
}

impl CellNode {
    /// Creates an unpolarized cell.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            polarization: Position2D::new(0.0, 0.0),
        }
    }
}

impl Polarizable for CellNode {
    fn add_polarization(&mut self, versor: Position2D) {
        let sum = self.polarization + versor;
        let norm = sum.norm();
        self.polarization = if norm == 0.0 { sum } else { sum / norm };
    }

    fn polarization(&self) -> Position2D {
        self.polarization
    }
}

impl Node for CellNode {
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

/// An inert particle: holds a position, receives no polarization.
pub struct ParticleNode {
    id: NodeId,
}

impl ParticleNode {
    /// Creates a particle.
    pub fn new(id: NodeId) -> Self {
        Self { id }
    }
}

impl Node for ParticleNode {
    fn id(&self) -> NodeId {
        self.id
    }
}
