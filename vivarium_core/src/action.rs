//! The action contract: the uniform interface every effect-producing
//! unit of a reaction must satisfy.

use crate::context::Context;
use thiserror::Error;
use vivarium_env::{Capability, Environment, NodeId, ReactionId};

/// Errors produced by the action lifecycle.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Construction-time: the target node lacks a required capability.
    /// Scenario-author error; should prevent the simulation from starting.
    #[error("node {node} lacks required capability: {required}")]
    CapabilityMismatch {
        /// The offending node
        node: NodeId,
        /// The capability the action requires
        required: Capability,
    },

    /// Execution-time: the owning node left the environment before the
    /// reaction fired. Recoverable; the scheduler drops the reaction and
    /// the run continues.
    #[error("target node {node} is no longer in the environment")]
    TargetUnavailable {
        /// The vanished node
        node: NodeId,
    },

    /// Clone-time: the requested clone target cannot host the action's
    /// required capability. Aborts only the clone operation (e.g., one
    /// division event), never the whole run.
    #[error("cannot clone onto node {node}: missing capability {required}")]
    IllegalCloneTarget {
        /// The rejected clone target
        node: NodeId,
        /// The capability the action requires
        required: Capability,
    },
}

impl ActionError {
    /// Creates a construction-time capability error.
    pub fn mismatch(node: NodeId, required: Capability) -> Self {
        Self::CapabilityMismatch { node, required }
    }

    /// Creates an execution-time vanished-target error.
    pub fn unavailable(node: NodeId) -> Self {
        Self::TargetUnavailable { node }
    }

    /// Re-frames a construction error as a clone error.
    ///
    /// Concrete actions clone by re-running their constructor against the
    /// target node; a `CapabilityMismatch` raised there is, from the
    /// caller's point of view, an `IllegalCloneTarget`.
    pub fn into_clone_error(self) -> Self {
        match self {
            Self::CapabilityMismatch { node, required } => {
                Self::IllegalCloneTarget { node, required }
            }
            other => other,
        }
    }

    /// True for errors the scheduler recovers from by dropping the
    /// reaction instead of aborting the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TargetUnavailable { .. })
    }
}

/// A single state-mutating effect bound to one owning node.
///
/// # Contract
///
/// - The owning node is fixed at construction and never re-targeted;
///   moving an action to another node goes through [`Action::clone_for`],
///   which produces a fresh instance.
/// - `execute` assumes exclusive access to the owning node's mutable
///   state for its duration and performs no internal locking; the one
///   exception is the shared random stream, which serializes its own
///   draws so they observe the global firing order.
/// - `execute` is synchronous and must not block on I/O.
pub trait Action: Send {
    /// Applies the action's effect to its owning node/environment.
    ///
    /// Fails with [`ActionError::TargetUnavailable`] if the owning node
    /// has been removed from the environment; the check happens before
    /// any random draw so a dropped reaction never perturbs the stream.
    fn execute(&mut self, env: &mut dyn Environment) -> Result<(), ActionError>;

    /// Returns the immutable declared conflict scope.
    ///
    /// Pure and callable at any time, including before the first execute.
    fn context(&self) -> Context;

    /// Returns the owning node.
    fn owner(&self) -> NodeId;

    /// Produces a new, independent action bound to `node` and associated
    /// with `reaction`, preserving the recipe (same environment bindings,
    /// same shared random stream) without aliasing per-instance state.
    ///
    /// Fails with [`ActionError::IllegalCloneTarget`] if `node` cannot
    /// host the action's required capability.
    fn clone_for(
        &self,
        env: &dyn Environment,
        node: NodeId,
        reaction: ReactionId,
    ) -> Result<Box<dyn Action>, ActionError>;
}

impl std::fmt::Debug for dyn Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").field("owner", &self.owner()).finish_non_exhaustive()
    }
}
