//! Shared deterministic random source.
//!
//! Every stochastic action in a run draws from one logical stream. The
//! stream is seeded once, shared by handle, and serialized behind a lock
//! so draws observe a single global total order even when the mutations
//! they feed are executed in parallel. Replaying the same firing order
//! with the same seed therefore reproduces bit-identical outcomes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};

enum Stream {
    /// Production stream: seeded ChaCha8.
    Seeded(ChaCha8Rng),

    /// Scripted stream for tests: replays the given values cyclically.
    Scripted { values: Vec<f32>, cursor: usize },
}

/// Handle to the run-wide random stream.
///
/// Cloning a `SharedRng` shares the underlying stream; it never re-seeds.
/// A cloned handle continues exactly where the previous draw left off,
/// which is what keeps cloned actions on the same global stream.
#[derive(Clone)]
pub struct SharedRng {
    seed: u64,
    stream: Arc<Mutex<Stream>>,
}

impl SharedRng {
    /// Creates a new stream from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stream: Arc::new(Mutex::new(Stream::Seeded(ChaCha8Rng::seed_from_u64(seed)))),
        }
    }

    /// Creates a scripted stream that replays `values` cyclically.
    ///
    /// Intended for tests that need exact draw values (degenerate-axis
    /// branches, concrete numeric scenarios).
    pub fn scripted(values: Vec<f32>) -> Self {
        assert!(!values.is_empty(), "scripted stream needs at least one value");
        Self {
            seed: 0,
            stream: Arc::new(Mutex::new(Stream::Scripted { values, cursor: 0 })),
        }
    }

    /// Draws a uniform single-precision value in `[0, 1)`.
    ///
    /// This is the primitive every stochastic action consumes; one draw
    /// advances the shared stream for all handles.
    pub fn next_f32(&self) -> f32 {
        let mut stream = self.stream.lock().unwrap();
        match &mut *stream {
            Stream::Seeded(rng) => rng.gen::<f32>(),
            Stream::Scripted { values, cursor } => {
                let value = values[*cursor % values.len()];
                *cursor += 1;
                value
            }
        }
    }

    /// Returns the seed this stream was created from (for diagnostics).
    ///
    /// Scripted streams report 0.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRng").field("seed", &self.seed).finish()
    }
}
