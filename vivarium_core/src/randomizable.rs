//! Common base for stochastic actions.

use vivarium_env::{NodeId, SharedRng};

/// State every stochastic action embeds: the owning node and a handle to
/// the run-wide random stream.
///
/// Concrete actions must draw all their randomness through [`rng`], never
/// from an independent source, or run-to-run reproducibility breaks.
/// Cloning copies the handle (same stream, same position), never re-seeds.
///
/// [`rng`]: Randomizable::rng
#[derive(Debug, Clone)]
pub struct Randomizable {
    owner: NodeId,
    rng: SharedRng,
}

impl Randomizable {
    /// Binds an owning node to the shared stream.
    pub fn new(owner: NodeId, rng: SharedRng) -> Self {
        Self { owner, rng }
    }

    /// Returns the owning node.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Returns the shared random stream handle.
    pub fn rng(&self) -> &SharedRng {
        &self.rng
    }
}
