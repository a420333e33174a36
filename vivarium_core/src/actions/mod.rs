//! Concrete actions.

mod brownian;
mod polarization;

pub use brownian::BrownianMove;
pub use polarization::RandomPolarization;
