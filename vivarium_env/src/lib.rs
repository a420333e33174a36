//! Vivarium Environment Abstraction Layer
//!
//! This crate defines the interfaces the simulation core calls into,
//! without committing to any concrete world implementation:
//! - Identity (`NodeId`, `ReactionId`)
//! - Geometry (`Position2D`, `Environment`)
//! - Node capabilities (`Node`, `Polarizable`)
//! - Randomness (`SharedRng`)
//!
//! # Determinism
//!
//! Every source of randomness in a run flows through a single `SharedRng`
//! stream, seeded from one 64-bit value and serialized behind a lock, so
//! that any run is reproducible from its seed and firing order alone.
//!
//! # Example
//!
//! ```ignore
//! use vivarium_env::{Environment, NodeId, SharedRng};
//!
//! fn jitter(env: &dyn Environment, node: NodeId, rng: &SharedRng) {
//!     let dx = f64::from(rng.next_f32()) - 0.5;
//!     let dy = f64::from(rng.next_f32()) - 0.5;
//!     let delta = env.make_position(dx, dy);
//!     // ...
//! }
//! ```

mod environment;
mod node;
mod rng;
mod types;

pub use environment::Environment;
pub use node::{Capability, Node, Polarizable};
pub use rng::SharedRng;
pub use types::{NodeId, Position2D, ReactionId};
