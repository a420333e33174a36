//! Vivarium Core - Action/Reaction Execution Contract
//!
//! This library is the engine room of a discrete-event, spatially-embedded
//! multi-agent simulation. It solves three problems every such platform has:
//! 1. **Reproducibility**: all stochastic actions draw from one serialized
//!    seeded stream, so a run is replayable from its seed and firing order
//! 2. **Conflict scoping**: every action declares a coarse [`Context`]
//!    (LOCAL / NEIGHBORHOOD / GLOBAL) that lets a scheduler run disjoint
//!    reactions in parallel without fine-grained locking
//! 3. **Topology change**: when a node divides, its reactions are cloned
//!    onto the new node through an explicit factory protocol that keeps the
//!    clone on the same random stream and never re-parents the original

pub mod action;
pub mod actions;
pub mod context;
pub mod randomizable;
pub mod reaction;

// Re-export key types for convenience
pub use action::{Action, ActionError};
pub use actions::{BrownianMove, RandomPolarization};
pub use context::{may_conflict, Context};
pub use randomizable::Randomizable;
pub use reaction::Reaction;

#[cfg(test)]
pub(crate) mod testutil;
