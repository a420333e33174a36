//! Random polarization: hands the owning cell a uniformly random unit
//! vector as its new migratory bias.

use crate::action::{Action, ActionError};
use crate::context::Context;
use crate::randomizable::Randomizable;
use vivarium_env::{Capability, Environment, NodeId, ReactionId, SharedRng};

/// Computes the polarization versor from two centered draws.
///
/// The degenerate-axis shortcuts are exact equality checks against zero,
/// `x` before `y`, and the post-sqrt `module == 0` branch is only
/// reachable if both squares underflow to zero. All three are preserved
/// as-is for numeric compatibility with long-standing scenario baselines.
fn versor(x: f64, y: f64) -> (f64, f64) {
    if x == 0.0 {
        (0.0, 1.0)
    } else if y == 0.0 {
        (1.0, 0.0)
    } else {
        let module = (x.powi(2) + y.powi(2)).sqrt();
        if module == 0.0 {
            (0.0, 0.0)
        } else {
            (x / module, y / module)
        }
    }
}

/// Assigns the owning node a random polarization versor on every firing.
///
/// Draws two single-precision uniforms from the shared stream, widens
/// them to double precision, and normalizes the centered pair. Context is
/// LOCAL: only the owning node is touched.
#[derive(Debug)]
pub struct RandomPolarization {
    base: Randomizable,
}

impl RandomPolarization {
    /// Binds the action to `node`.
    ///
    /// Fails with [`ActionError::CapabilityMismatch`] unless the node is
    /// present and can receive a polarization vector.
    pub fn new(env: &dyn Environment, node: NodeId, rng: SharedRng) -> Result<Self, ActionError> {
        match env.node(node) {
            Some(n) if n.polarizable().is_some() => Ok(Self {
                base: Randomizable::new(node, rng),
            }),
            _ => Err(ActionError::mismatch(node, Capability::Polarization)),
        }
    }
}

impl Action for RandomPolarization {
    fn execute(&mut self, env: &mut dyn Environment) -> Result<(), ActionError> {
        let owner = self.base.owner();

        // Availability check precedes the draws so a dropped reaction
        // leaves the shared stream untouched.
        match env.node(owner) {
            Some(n) if n.polarizable().is_some() => {}
            _ => return Err(ActionError::unavailable(owner)),
        }

        let x = f64::from(self.base.rng().next_f32()) - 0.5;
        let y = f64::from(self.base.rng().next_f32()) - 0.5;
        let (vx, vy) = versor(x, y);
        let random_versor = env.make_position(vx, vy);

        let node = env
            .node_mut(owner)
            .ok_or_else(|| ActionError::unavailable(owner))?;
        let cell = node
            .polarizable_mut()
            .ok_or_else(|| ActionError::unavailable(owner))?;
        cell.add_polarization(random_versor);
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
        // Same shared stream, never a fresh seed.
        Self::new(env, node, self.base.rng().clone())
            .map(|action| Box::new(action) as Box<dyn Action>)
            .map_err(ActionError::into_clone_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestEnv;
    use approx::assert_relative_eq;

    fn polarization_of(env: &TestEnv, node: NodeId) -> vivarium_env::Position2D {
        env.node(node).unwrap().polarizable().unwrap().polarization()
    }

    #[test]
    fn test_versor_unit_norm() {
        let (x, y) = versor(0.25, 0.5);
        assert_relative_eq!((x * x + y * y).sqrt(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_versor_degenerate_axes() {
        // x == 0 wins regardless of y, checked before y == 0.
        assert_eq!(versor(0.0, 0.37), (0.0, 1.0));
        assert_eq!(versor(0.0, 0.0), (0.0, 1.0));
        assert_eq!(versor(-0.42, 0.0), (1.0, 0.0));
    }

    #[test]
    fn test_versor_zero_module_underflow() {
        // Both squares underflow to zero while the inputs are nonzero.
        // Documented edge case: the exact post-sqrt equality check is
        // kept, and this is the only path into the zero-vector branch.
        let tiny = 1e-200;
        assert_eq!(versor(tiny, tiny), (0.0, 0.0));
    }

    #[test]
    fn test_concrete_scenario_half_half() {
        // U1 = U2 = 0.5 gives x = 0, so the first shortcut fires.
        let mut env = TestEnv::new(1.0);
        let cell = env.add_cell_at(0.0, 0.0);
        let rng = SharedRng::scripted(vec![0.5, 0.5]);

        let mut action = RandomPolarization::new(&env, cell, rng).unwrap();
        action.execute(&mut env).unwrap();

        let p = polarization_of(&env, cell);
        assert_eq!((p.x, p.y), (0.0, 1.0));
    }

    #[test]
    fn test_concrete_scenario_quarter() {
        // U1 = 0.75, U2 = 1.0 gives x = 0.25, y = 0.5.
        let mut env = TestEnv::new(1.0);
        let cell = env.add_cell_at(0.0, 0.0);
        let rng = SharedRng::scripted(vec![0.75, 1.0]);

        let mut action = RandomPolarization::new(&env, cell, rng).unwrap();
        action.execute(&mut env).unwrap();

        let p = polarization_of(&env, cell);
        assert_relative_eq!(p.x, 0.25 / 0.3125_f64.sqrt(), epsilon = 1e-3);
        assert_relative_eq!(p.y, 0.5 / 0.3125_f64.sqrt(), epsilon = 1e-3);
        assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_capability_gating() {
        let mut env = TestEnv::new(1.0);
        let particle = env.add_particle_at(0.0, 0.0);

        let err = RandomPolarization::new(&env, particle, SharedRng::new(42)).unwrap_err();
        assert!(matches!(err, ActionError::CapabilityMismatch { .. }));

        let cell = env.add_cell_at(1.0, 1.0);
        assert!(RandomPolarization::new(&env, cell, SharedRng::new(42)).is_ok());
    }

    #[test]
    fn test_determinism_over_firings() {
        let run = |seed: u64| -> Vec<(f64, f64)> {
            let mut env = TestEnv::new(1.0);
            let cell = env.add_cell_at(0.0, 0.0);
            let mut action = RandomPolarization::new(&env, cell, SharedRng::new(seed)).unwrap();

            (0..64)
                .map(|_| {
                    action.execute(&mut env).unwrap();
                    let p = polarization_of(&env, cell);
                    (p.x, p.y)
                })
                .collect()
        };

        // Bit-identical across independent runs with the same seed.
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }

    #[test]
    fn test_execute_against_removed_node() {
        let mut env = TestEnv::new(1.0);
        let cell = env.add_cell_at(0.0, 0.0);
        let rng = SharedRng::new(42);
        let mut action = RandomPolarization::new(&env, cell, rng.clone()).unwrap();

        env.remove_node(cell);
        let err = action.execute(&mut env).unwrap_err();
        assert!(matches!(err, ActionError::TargetUnavailable { .. }));

        // The failed firing consumed no draws.
        let reference = SharedRng::new(42);
        assert_eq!(rng.next_f32(), reference.next_f32());
    }

    #[test]
    fn test_clone_fidelity() {
        let mut env = TestEnv::new(1.0);
        let cell = env.add_cell_at(0.0, 0.0);
        let other = env.add_cell_at(5.0, 5.0);

        let rng = SharedRng::new(42);
        let mut original = RandomPolarization::new(&env, cell, rng).unwrap();
        original.execute(&mut env).unwrap();

        let mut clone = original
            .clone_for(&env, other, ReactionId::from_seed(1))
            .unwrap();
        assert_eq!(clone.context(), original.context());
        assert_eq!(clone.owner(), other);

        // The clone continues the original stream: its first firing uses
        // draws 3 and 4 of the seed-42 stream.
        clone.execute(&mut env).unwrap();
        let reference = SharedRng::new(42);
        for _ in 0..2 {
            let _ = reference.next_f32();
        }
        let x = f64::from(reference.next_f32()) - 0.5;
        let y = f64::from(reference.next_f32()) - 0.5;
        let expected = versor(x, y);
        let p = polarization_of(&env, other);
        assert_eq!((p.x, p.y), expected);
    }

    #[test]
    fn test_clone_onto_incapable_node() {
        let mut env = TestEnv::new(1.0);
        let cell = env.add_cell_at(0.0, 0.0);
        let particle = env.add_particle_at(1.0, 0.0);

        let action = RandomPolarization::new(&env, cell, SharedRng::new(42)).unwrap();
        let err = action
            .clone_for(&env, particle, ReactionId::from_seed(1))
            .unwrap_err();
        assert!(matches!(err, ActionError::IllegalCloneTarget { .. }));
    }
}
