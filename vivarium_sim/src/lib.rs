//! Vivarium Deterministic Simulation Harness
//!
//! This crate runs the action/reaction core in a controlled world where
//! every outcome is reproducible from a single 64-bit seed:
//! - **Randomness**: one shared ChaCha8 stream, serialized so draws
//!   observe the firing order even when execution batches are computed
//!   for parallelism
//! - **Topology**: a petri-dish environment with neighborhood-by-radius,
//!   plus periodic node division exercising the clone protocol
//! - **Scheduling**: reactions fire in a stable order each tick, with
//!   context-disjoint batches reported for a parallel executor and
//!   vanished-target reactions dropped without stopping the clock
//!
//! # Usage
//!
//! ```ignore
//! use vivarium_sim::{Runner, SimConfig};
//!
//! let result = Runner::new(SimConfig {
//!     seed: 42,
//!     num_cells: 8,
//!     ..Default::default()
//! })
//! .run();
//! assert!(result.passed);
//! ```

mod cell;
mod dish;
mod runner;
mod scheduler;
mod world;

pub use cell::{CellNode, ParticleNode};
pub use dish::DishEnvironment;
pub use runner::{RunResult, Runner};
pub use scheduler::{partition_conflict_free, run_tick, TickOutcome};
pub use world::{SimConfig, SimWorld};
