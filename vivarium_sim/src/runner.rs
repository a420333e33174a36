//! Run loop: builds a world from a config and drives it to completion.

use crate::world::{SimConfig, SimWorld};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Results from a completed (or aborted) run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Seed used
    pub seed: u64,

    /// Whether the run completed without a scenario-level failure
    pub passed: bool,

    /// Ticks executed
    pub total_ticks: u64,

    /// Reactions fired
    pub fired: u64,

    /// Reactions dropped (vanished targets)
    pub dropped: u64,

    /// Successful node divisions
    pub divisions: u64,

    /// Divisions aborted by an illegal clone target
    pub failed_divisions: u64,

    /// Nodes in the dish at the end
    pub final_node_count: usize,

    /// Failure message if any
    pub failure_reason: Option<String>,
}

/// Drives a `SimWorld` for the configured number of ticks.
pub struct Runner {
    config: SimConfig,
}

impl Runner {
    /// Creates a runner for the given configuration.
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Runs the simulation to completion.
    ///
    /// A capability error while building the world is a scenario-author
    /// error and fails the run before tick zero. Clone failures during
    /// division abort only that division; drops are counted and the
    /// clock keeps advancing.
    pub fn run(&self) -> RunResult {
        let seed = self.config.seed;
        info!("starting run (seed={}, ticks={})", seed, self.config.ticks);

        let mut world = match SimWorld::new(self.config.clone()) {
            Ok(world) => world,
            Err(err) => {
                return RunResult {
                    seed,
                    passed: false,
                    total_ticks: 0,
                    fired: 0,
                    dropped: 0,
                    divisions: 0,
                    failed_divisions: 0,
                    final_node_count: 0,
                    failure_reason: Some(format!("scenario build failed: {}", err)),
                }
            }
        };

        let mut failed_divisions = 0;
        for tick in 0..self.config.ticks {
            world.tick();

            let interval = self.config.division_interval;
            if interval > 0 && (tick + 1) % interval == 0 {
                // Deterministic choice: the first cell in stable order.
                if let Some(&parent) = world.cell_ids().first() {
                    if let Err(err) = world.divide(parent) {
                        warn!("division of {} aborted: {}", parent, err);
                        failed_divisions += 1;
                    }
                }
            }
        }

        info!(
            "run finished: fired={} dropped={} divisions={} nodes={}",
            world.fired(),
            world.dropped(),
            world.divisions(),
            world.env().node_count()
        );

        RunResult {
            seed,
            passed: true,
            total_ticks: world.tick_count(),
            fired: world.fired(),
            dropped: world.dropped(),
            divisions: world.divisions(),
            failed_divisions,
            final_node_count: world.env().node_count(),
            failure_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_completes() {
        let result = Runner::new(SimConfig {
            seed: 42,
            num_cells: 4,
            num_particles: 1,
            ticks: 20,
            division_interval: 10,
            ..Default::default()
        })
        .run();

        assert!(result.passed);
        assert_eq!(result.total_ticks, 20);
        assert_eq!(result.divisions, 2);
        assert_eq!(result.final_node_count, 5 + 2);
        assert!(result.fired > 0);
    }

    #[test]
    fn test_run_without_divisions() {
        let result = Runner::new(SimConfig {
            seed: 7,
            num_cells: 2,
            num_particles: 0,
            ticks: 5,
            division_interval: 0,
            ..Default::default()
        })
        .run();

        assert!(result.passed);
        assert_eq!(result.divisions, 0);
        assert_eq!(result.fired, 10);
        assert_eq!(result.dropped, 0);
    }
}
