//! Brownian motion: a small random displacement of the owning node.

use crate::action::{Action, ActionError};
use crate::context::Context;
use crate::randomizable::Randomizable;
use vivarium_env::{Capability, Environment, NodeId, ReactionId, SharedRng};

/// Displaces the owning node by a uniform random step on every firing.
///
/// Each coordinate of the step is `(U - 0.5) * range` with `U` drawn from
/// the shared single-precision stream. Requires only that the node holds
/// a position in the environment. Context is LOCAL.
pub struct BrownianMove {
    base: Randomizable,
    range: f64,
}

impl BrownianMove {
    /// Binds the action to `node` with the given maximum step size.
    ///
    /// Fails with [`ActionError::CapabilityMismatch`] if the node has no
    /// position in the environment at construction time.
    pub fn new(
        env: &dyn Environment,
        node: NodeId,
        rng: SharedRng,
        range: f64,
    ) -> Result<Self, ActionError> {
        if env.position(node).is_none() {
            return Err(ActionError::mismatch(node, Capability::Position));
        }
        Ok(Self {
            base: Randomizable::new(node, rng),
            range,
        })
    }

    /// Returns the maximum step size.
    pub fn range(&self) -> f64 {
        self.range
    }
}

impl Action for BrownianMove {
    fn execute(&mut self, env: &mut dyn Environment) -> Result<(), ActionError> {
        let owner = self.base.owner();

        // Check first: a vanished target must not consume draws.
        if env.position(owner).is_none() {
            return Err(ActionError::unavailable(owner));
        }

        let dx = (f64::from(self.base.rng().next_f32()) - 0.5) * self.range;
        let dy = (f64::from(self.base.rng().next_f32()) - 0.5) * self.range;
        let delta = env.make_position(dx, dy);

        if !env.move_node(owner, delta) {
            return Err(ActionError::unavailable(owner));
        }
        Ok(())
    }

    fn context(&self) -> Context {
        Context::Local
    }

    fn owner(&self) -> NodeId {
        self.base.owner()
    }

    fn clone_for(
        &self,
        env: &dyn Environment,
        node: NodeId,
        _reaction: ReactionId,
    ) -> Result<Box<dyn Action>, ActionError> {
        Self::new(env, node, self.base.rng().clone(), self.range)
            .map(|action| Box::new(action) as Box<dyn Action>)
            .map_err(ActionError::into_clone_error)
    }
}
