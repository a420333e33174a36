//! Tick scheduler for the harness.
//!
//! Fires every reaction once per tick in a stable order. Before firing,
//! the tick's batch is partitioned into conflict-free groups via the
//! core's context test; the groups are what a parallel executor could
//! run concurrently, but execution here stays serialized so random draws
//! observe the firing order. Reactions whose target vanished are dropped
//! and counted; the clock keeps advancing.

use tracing::{error, warn};
use vivarium_core::{may_conflict, Reaction};
use vivarium_env::Environment;

/// Per-tick accounting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickOutcome {
    /// Reactions that fired successfully
    pub fired: u64,

    /// Reactions dropped because their target vanished (or errored)
    pub dropped: u64,

    /// Conflict-free groups the tick's batch partitioned into
    pub parallel_groups: usize,
}

/// Greedily partitions reaction indices into conflict-free groups.
///
/// Within a group, no pair of reactions may conflict under the core's
/// conservative context test, so a group is safe to hand to parallel
/// workers. The partition is deterministic for a fixed reaction order.
pub fn partition_conflict_free(env: &dyn Environment, reactions: &[Reaction]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (idx, reaction) in reactions.iter().enumerate() {
        let slot = groups.iter().position(|group| {
            group.iter().all(|&other| {
                !may_conflict(
                    env,
                    reaction.context(),
                    reaction.owner(),
                    reactions[other].context(),
                    reactions[other].owner(),
                )
            })
        });
        match slot {
            Some(g) => groups[g].push(idx),
            None => groups.push(vec![idx]),
        }
    }

    groups
}

/// Fires every reaction once, dropping the ones that fail.
///
/// Failed reactions are removed from the schedule: recoverable failures
/// (vanished target) are logged at warn level, anything else at error
/// level, and in both cases the run continues.
pub fn run_tick(env: &mut dyn Environment, reactions: &mut Vec<Reaction>) -> TickOutcome {
    let parallel_groups = partition_conflict_free(env, reactions).len();

    let mut fired = 0;
    let mut dropped = 0;
    let mut failed: Vec<usize> = Vec::new();

    for (idx, reaction) in reactions.iter_mut().enumerate() {
        match reaction.fire(env) {
            Ok(()) => fired += 1,
            Err(err) if err.is_recoverable() => {
                warn!("dropping reaction {} ({})", reaction.id(), err);
                dropped += 1;
                failed.push(idx);
            }
            Err(err) => {
                error!("dropping reaction {} ({})", reaction.id(), err);
                dropped += 1;
                failed.push(idx);
            }
        }
    }

    for idx in failed.into_iter().rev() {
        reactions.remove(idx);
    }

    TickOutcome {
        fired,
        dropped,
        parallel_groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellNode;
    use crate::dish::DishEnvironment;
    use vivarium_core::actions::RandomPolarization;
    use vivarium_core::{Action, ActionError, Context, Randomizable};
    use vivarium_env::{NodeId, Position2D, ReactionId, SharedRng};

    /// Test-only action with GLOBAL scope.
    struct StirAll {
        base: Randomizable,
    }

    impl Action for StirAll {
        fn execute(&mut self, env: &mut dyn Environment) -> Result<(), ActionError> {
            if !env.contains(self.base.owner()) {
                return Err(ActionError::unavailable(self.base.owner()));
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
            Ok(Box::new(StirAll {
                base: Randomizable::new(node, self.base.rng().clone()),
            }))
        }
    }

    fn dish_with_cells(radius: f64, coords: &[(f64, f64)]) -> (DishEnvironment, Vec<NodeId>) {
        let mut env = DishEnvironment::new(radius);
        let ids: Vec<NodeId> = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                let id = NodeId::from_seed(i as u64);
                env.add_node(Box::new(CellNode::new(id)), Position2D::new(x, y));
                id
            })
            .collect();
        (env, ids)
    }

    fn local_reaction(
        env: &DishEnvironment,
        seed: u64,
        owner: NodeId,
        rng: &SharedRng,
    ) -> Reaction {
        Reaction::new(ReactionId::from_seed(seed), owner, 1.0).with_action(Box::new(
            RandomPolarization::new(env, owner, rng.clone()).unwrap(),
        ))
    }

    #[test]
    fn test_distant_locals_share_a_group() {
        let (env, ids) = dish_with_cells(1.0, &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let rng = SharedRng::new(42);
        let reactions: Vec<Reaction> = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| local_reaction(&env, i as u64, id, &rng))
            .collect();

        let groups = partition_conflict_free(&env, &reactions);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_same_owner_locals_serialize() {
        let (env, ids) = dish_with_cells(1.0, &[(0.0, 0.0)]);
        let rng = SharedRng::new(42);
        let reactions = vec![
            local_reaction(&env, 0, ids[0], &rng),
            local_reaction(&env, 1, ids[0], &rng),
        ];

        let groups = partition_conflict_free(&env, &reactions);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_global_reaction_serializes_everything() {
        let (env, ids) = dish_with_cells(1.0, &[(0.0, 0.0), (10.0, 0.0)]);
        let rng = SharedRng::new(42);
        let reactions = vec![
            local_reaction(&env, 0, ids[0], &rng),
            Reaction::new(ReactionId::from_seed(1), ids[1], 1.0).with_action(Box::new(StirAll {
                base: Randomizable::new(ids[1], rng.clone()),
            })),
            local_reaction(&env, 2, ids[1], &rng),
        ];

        let groups = partition_conflict_free(&env, &reactions);
        // The global reaction can share a group with nothing.
        assert!(groups.len() >= 2);
        assert!(groups.iter().all(|g| !g.contains(&1) || g.len() == 1));
    }

    #[test]
    fn test_run_tick_drops_vanished_targets() {
        let (mut env, ids) = dish_with_cells(1.0, &[(0.0, 0.0), (10.0, 0.0)]);
        let rng = SharedRng::new(42);
        let mut reactions = vec![
            local_reaction(&env, 0, ids[0], &rng),
            local_reaction(&env, 1, ids[1], &rng),
        ];

        env.remove_node(ids[1]);
        let outcome = run_tick(&mut env, &mut reactions);

        assert_eq!(outcome.fired, 1);
        assert_eq!(outcome.dropped, 1);
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].owner(), ids[0]);

        // The survivor keeps firing on later ticks.
        let outcome = run_tick(&mut env, &mut reactions);
        assert_eq!(outcome.fired, 1);
        assert_eq!(outcome.dropped, 0);
    }
}
