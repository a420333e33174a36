//! Reactions: timed events grouping one or more actions.

use crate::action::{Action, ActionError};
use crate::context::Context;
use vivarium_env::{Environment, NodeId, ReactionId};

/// A timed event that, when fired, executes its actions in order.
///
/// The rate is scheduling metadata for an external event-queue scheduler;
/// the core does not interpret it. The reaction's conflict scope is the
/// broadest scope among its actions, which is what a scheduler keys its
/// concurrency checks on.
#[derive(Debug)]
pub struct Reaction {
    id: ReactionId,
    owner: NodeId,
    rate: f64,
    actions: Vec<Box<dyn Action>>,
}

impl Reaction {
    /// Creates an empty reaction owned by `owner`.
    pub fn new(id: ReactionId, owner: NodeId, rate: f64) -> Self {
        Self {
            id,
            owner,
            rate,
            actions: Vec::new(),
        }
    }

    /// Appends an action (builder style).
    pub fn with_action(mut self, action: Box<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    /// Appends an action.
    pub fn push_action(&mut self, action: Box<dyn Action>) {
        self.actions.push(action);
    }

    /// Returns the reaction's id.
    pub fn id(&self) -> ReactionId {
        self.id
    }

    /// Returns the owning node.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Returns the scheduling rate (events per unit time).
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True if the reaction has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the broadest conflict scope among the actions.
    ///
    /// An empty reaction is LOCAL: it can touch nothing beyond itself.
    pub fn context(&self) -> Context {
        self.actions
            .iter()
            .map(|a| a.context())
            .fold(Context::Local, Context::broadest)
    }

    /// Fires the reaction: executes every action in order.
    ///
    /// Stops at the first failing action. No partial rollback: the
    /// scheduler's contract is to drop the reaction on a recoverable
    /// failure and keep the clock advancing.
    pub fn fire(&mut self, env: &mut dyn Environment) -> Result<(), ActionError> {
        for action in &mut self.actions {
            action.execute(env)?;
        }
        Ok(())
    }

    /// Builds a behaviorally identical reaction for a new owner.
    ///
    /// Every action is cloned through its own factory, so the clones
    /// reuse the same shared random stream and environment bindings but
    /// alias none of the original's per-instance state. Capability
    /// failures surface as [`ActionError::IllegalCloneTarget`] and abort
    /// only this clone.
    pub fn clone_for(
        &self,
        env: &dyn Environment,
        id: ReactionId,
        owner: NodeId,
    ) -> Result<Reaction, ActionError> {
        let mut clone = Reaction::new(id, owner, self.rate);
        for action in &self.actions {
            let cloned = action
                .clone_for(env, owner, id)
                .map_err(ActionError::into_clone_error)?;
            clone.push_action(cloned);
        }
        Ok(clone)
    }
}
