//! Node capability interfaces.
//!
//! The core never inspects concrete node types. A node is an opaque
//! capability bundle: each capability is a trait, and the `Node` trait
//! exposes optional accessors for them. Concrete node types opt in by
//! overriding the accessors; the defaults decline everything. Actions
//! check capability presence at construction time and report a typed
//! error instead of discovering a mismatch mid-run.

use crate::types::{NodeId, Position2D};
use serde::{Deserialize, Serialize};

/// Named capabilities an action can require from its owning node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// The node can receive a polarization vector.
    Polarization,

    /// The node occupies a position in the environment.
    Position,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Polarization => write!(f, "polarization receiver"),
            Capability::Position => write!(f, "position in environment"),
        }
    }
}

/// A node that can receive a polarization vector (a migratory bias).
///
/// Merge semantics are the node's business; the core only hands over
/// the vector.
pub trait Polarizable {
    /// Merges `versor` into the node's current polarization.
    fn add_polarization(&mut self, versor: Position2D);

    /// Returns the node's current polarization.
    fn polarization(&self) -> Position2D;
}

/// An addressable simulated entity, seen by the core as a capability bundle.
pub trait Node: Send {
    /// Returns the node's identifier.
    fn id(&self) -> NodeId;

    /// Returns the polarization capability, if this node type supports it.
    fn polarizable(&self) -> Option<&dyn Polarizable> {
        None
    }

    /// Mutable access to the polarization capability.
    fn polarizable_mut(&mut self) -> Option<&mut dyn Polarizable> {
        None
    }

    /// Tests whether this node supports a capability.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Polarization => self.polarizable().is_some(),
            // Position is granted by the environment, not the node type.
            Capability::Position => true,
        }
    }
}
