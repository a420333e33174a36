//! Conflict scoping for concurrent reaction execution.
//!
//! Every action declares the broadest scope of state it may touch. A
//! scheduler uses the declaration as a cheap, conservative race test:
//! two reactions may run in parallel only if their scopes provably do
//! not intersect. False positives (conflicts declared where no shared
//! state exists) are acceptable; false negatives are not.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use vivarium_env::{Environment, NodeId};

/// Declared scope of state an action may read or write.
///
/// Ordered by scope breadth: `Local < Neighborhood < Global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Context {
    /// Only the owning node's state.
    Local,

    /// The owning node plus its spatially adjacent nodes.
    Neighborhood,

    /// The entire environment.
    Global,
}

impl Context {
    /// Returns the broader of two contexts.
    pub fn broadest(self, other: Context) -> Context {
        self.max(other)
    }

    /// Returns a short human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Context::Local => "local",
            Context::Neighborhood => "neighborhood",
            Context::Global => "global",
        }
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The owning node plus its neighbors.
fn closed_neighborhood(env: &dyn Environment, owner: NodeId) -> HashSet<NodeId> {
    let mut set: HashSet<NodeId> = env.neighborhood(owner).into_iter().collect();
    set.insert(owner);
    set
}

/// Conservative conflict test between two declared scopes.
///
/// Two actions may be scheduled concurrently iff this returns false:
/// - GLOBAL conflicts with everything in the same tick
/// - LOCAL/LOCAL conflicts iff both own the same node
/// - LOCAL/NEIGHBORHOOD conflicts iff the local owner lies in the
///   other's closed neighborhood
/// - NEIGHBORHOOD/NEIGHBORHOOD conflicts iff the closed neighborhoods
///   intersect
pub fn may_conflict(
    env: &dyn Environment,
    a: Context,
    a_owner: NodeId,
    b: Context,
    b_owner: NodeId,
) -> bool {
    use Context::*;
    match (a, b) {
        (Global, _) | (_, Global) => true,
        (Local, Local) => a_owner == b_owner,
        (Local, Neighborhood) => closed_neighborhood(env, b_owner).contains(&a_owner),
        (Neighborhood, Local) => closed_neighborhood(env, a_owner).contains(&b_owner),
        (Neighborhood, Neighborhood) => {
            let ours = closed_neighborhood(env, a_owner);
            closed_neighborhood(env, b_owner)
                .iter()
                .any(|id| ours.contains(id))
        }
    }
}
