//! SimWorld - the simulation container.

use crate::cell::{CellNode, ParticleNode};
use crate::dish::DishEnvironment;
use crate::scheduler::{run_tick, TickOutcome};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vivarium_core::actions::{BrownianMove, RandomPolarization};
use vivarium_core::{ActionError, Reaction};
use vivarium_env::{Environment, NodeId, Position2D, ReactionId, SharedRng};

/// Configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Master seed for determinism
    pub seed: u64,

    /// Number of cells (polarizable nodes)
    pub num_cells: usize,

    /// Number of inert particles
    pub num_particles: usize,

    /// Ticks to run
    pub ticks: u64,

    /// Neighborhood radius in the dish
    pub neighbor_radius: f64,

    /// Standard deviation of initial node placement around the origin
    pub placement_std: f64,

    /// Maximum Brownian step per firing
    pub brownian_range: f64,

    /// Divide one cell every this many ticks (0 = never)
    pub division_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_cells: 6,
            num_particles: 2,
            ticks: 100,
            neighbor_radius: 2.0,
            placement_std: 3.0,
            brownian_range: 0.5,
            division_interval: 0,
        }
    }
}

/// The SimWorld - dish, reactions, and run-wide counters.
pub struct SimWorld {
    /// Configuration
    pub config: SimConfig,

    /// The dish environment
    env: DishEnvironment,

    /// Scheduled reactions, in stable firing order
    reactions: Vec<Reaction>,

    /// Shared action random stream
    rng: SharedRng,

    /// Placement/division offsets, on a separate derived stream so
    /// topology setup never perturbs action randomness
    placement_rng: ChaCha8Rng,

    /// Counters for deterministic id allocation
    next_node_seed: u64,
    next_reaction_seed: u64,

    /// Run-wide accounting
    tick_count: u64,
    fired: u64,
    dropped: u64,
    divisions: u64,
}

impl SimWorld {
    /// Builds the world: spawns nodes and their reactions.
    ///
    /// A capability error here means the scenario is invalid; the caller
    /// should abort before tick zero.
    pub fn new(config: SimConfig) -> Result<Self, ActionError> {
        // Derive separate seeds for different subsystems
        let action_seed = config.seed;
        let placement_seed = config.seed.wrapping_mul(0x9e3779b97f4a7c15);

        let mut world = Self {
            env: DishEnvironment::new(config.neighbor_radius),
            reactions: Vec::new(),
            rng: SharedRng::new(action_seed),
            placement_rng: ChaCha8Rng::seed_from_u64(placement_seed),
            next_node_seed: 0,
            next_reaction_seed: 0,
            tick_count: 0,
            fired: 0,
            dropped: 0,
            divisions: 0,
            config,
        };

        for _ in 0..world.config.num_cells {
            let id = world.alloc_node_id();
            let position = world.sample_placement();
            world.env.add_node(Box::new(CellNode::new(id)), position);

            let reaction_id = world.alloc_reaction_id();
            let reaction = Reaction::new(reaction_id, id, 1.0)
                .with_action(Box::new(RandomPolarization::new(
                    &world.env,
                    id,
                    world.rng.clone(),
                )?))
                .with_action(Box::new(BrownianMove::new(
                    &world.env,
                    id,
                    world.rng.clone(),
                    world.config.brownian_range,
                )?));
            world.reactions.push(reaction);
        }

        for _ in 0..world.config.num_particles {
            let id = world.alloc_node_id();
            let position = world.sample_placement();
            world.env.add_node(Box::new(ParticleNode::new(id)), position);

            let reaction_id = world.alloc_reaction_id();
            let reaction = Reaction::new(reaction_id, id, 1.0).with_action(Box::new(
                BrownianMove::new(&world.env, id, world.rng.clone(), world.config.brownian_range)?,
            ));
            world.reactions.push(reaction);
        }

        info!(
            "world ready: {} nodes, {} reactions (seed={})",
            world.env.node_count(),
            world.reactions.len(),
            world.config.seed
        );
        Ok(world)
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::from_seed(self.next_node_seed);
        self.next_node_seed += 1;
        id
    }

    fn alloc_reaction_id(&mut self) -> ReactionId {
        let id = ReactionId::from_seed(self.next_reaction_seed);
        self.next_reaction_seed += 1;
        id
    }

    fn sample_placement(&mut self) -> Position2D {
        let normal = Normal::new(0.0, self.config.placement_std).unwrap();
        Position2D::new(
            normal.sample(&mut self.placement_rng),
            normal.sample(&mut self.placement_rng),
        )
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = run_tick(&mut self.env, &mut self.reactions);
        self.tick_count += 1;
        self.fired += outcome.fired;
        self.dropped += outcome.dropped;
        debug!(
            "tick {}: fired={} dropped={} groups={}",
            self.tick_count, outcome.fired, outcome.dropped, outcome.parallel_groups
        );
        outcome
    }

    /// Divides `parent`: spawns a like-typed node beside it and clones
    /// the parent's reactions onto the child.
    ///
    /// On [`ActionError::IllegalCloneTarget`] the child is removed again
    /// and only this division is aborted; the run continues.
    pub fn divide(&mut self, parent: NodeId) -> Result<NodeId, ActionError> {
        let parent_position = self
            .env
            .position(parent)
            .ok_or_else(|| ActionError::unavailable(parent))?;
        let parent_is_cell = self
            .env
            .node(parent)
            .map(|n| n.polarizable().is_some())
            .unwrap_or(false);

        let child = self.alloc_node_id();
        let offset = self.sample_placement() * 0.1;
        let child_position = parent_position + offset;
        if parent_is_cell {
            self.env
                .add_node(Box::new(CellNode::new(child)), child_position);
        } else {
            self.env
                .add_node(Box::new(ParticleNode::new(child)), child_position);
        }

        // Clone all of the parent's reactions before committing any.
        let mut clones = Vec::new();
        for reaction in self.reactions.iter().filter(|r| r.owner() == parent) {
            let id = ReactionId::from_seed(self.next_reaction_seed + clones.len() as u64);
            match reaction.clone_for(&self.env, id, child) {
                Ok(clone) => clones.push(clone),
                Err(err) => {
                    self.env.remove_node(child);
                    return Err(err);
                }
            }
        }
        self.next_reaction_seed += clones.len() as u64;
        self.reactions.extend(clones);
        self.divisions += 1;

        debug!("node {} divided into {}", parent, child);
        Ok(child)
    }

    /// Removes a node; its reactions will be dropped on their next firing.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        self.env.remove_node(id)
    }

    /// Returns the ids of the polarizable nodes, in stable order.
    pub fn cell_ids(&self) -> Vec<NodeId> {
        self.env
            .node_ids()
            .into_iter()
            .filter(|&id| {
                self.env
                    .node(id)
                    .map(|n| n.polarizable().is_some())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Snapshot of all node positions, in stable order.
    pub fn positions(&self) -> Vec<(NodeId, Position2D)> {
        self.env
            .node_ids()
            .into_iter()
            .filter_map(|id| self.env.position(id).map(|p| (id, p)))
            .collect()
    }

    /// Snapshot of all cell polarizations, in stable order.
    pub fn polarizations(&self) -> Vec<(NodeId, Position2D)> {
        self.cell_ids()
            .into_iter()
            .filter_map(|id| {
                self.env
                    .node(id)
                    .and_then(|n| n.polarizable())
                    .map(|p| (id, p.polarization()))
            })
            .collect()
    }

    /// Returns the environment.
    pub fn env(&self) -> &DishEnvironment {
        &self.env
    }

    /// Returns the number of scheduled reactions.
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Returns the current tick count.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns total reactions fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Returns total reactions dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Returns total successful divisions.
    pub fn divisions(&self) -> u64 {
        self.divisions
    }
}
