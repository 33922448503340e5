//! Random number sources.
//!
//! The simulations only ever ask for one thing: a uniformly distributed integer
//! in an inclusive range. `EntropyRandom` seeds a fresh generator for every call,
//! so no state is shared between draws. `SeededRandom` produces a reproducible
//! sequence, which is handy for replaying a run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers.
///
/// # Examples
///
/// ```
/// use minotaur_core::traits::{RandomSource, SeededRandom};
///
/// let mut rng = SeededRandom::new(7);
/// let n = rng.generate(10, 500);
/// assert!((10..=500).contains(&n));
/// ```
pub trait RandomSource: Send {
    /// Draw an integer from `min..=max`.
    ///
    /// If `min > max` the bounds are swapped.
    fn generate(&mut self, min: u64, max: u64) -> u64;
}

/// Draws each number from a freshly seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropyRandom;

impl EntropyRandom {
    /// Create a new entropy-backed source.
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for EntropyRandom {
    fn generate(&mut self, min: u64, max: u64) -> u64 {
        let (lo, hi) = ordered(min, max);
        StdRng::from_entropy().gen_range(lo..=hi)
    }
}

/// A reproducible source seeded once at construction.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn generate(&mut self, min: u64, max: u64) -> u64 {
        let (lo, hi) = ordered(min, max);
        self.rng.gen_range(lo..=hi)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn generate(&mut self, min: u64, max: u64) -> u64 {
        (**self).generate(min, max)
    }
}

fn ordered(a: u64, b: u64) -> (u64, u64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
