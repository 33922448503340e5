//! Choosing who goes into the labyrinth next.
//!
//! The Minotaur picks an index in `[0, upper]` over and over, where `upper` is
//! the number of guests. Picking `upper` itself leaves the labyrinth empty.

use minotaur_core::RandomSource;

/// Picks the next guest index to send into the labyrinth.
pub trait GuestSelector {
    /// Return an index in `0..=upper`.
    fn select(&mut self, upper: usize) -> usize;
}

/// Picks uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomSelector<R> {
    source: R,
}

impl<R: RandomSource> RandomSelector<R> {
    /// Wrap a random source.
    pub fn new(source: R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource> GuestSelector for RandomSelector<R> {
    fn select(&mut self, upper: usize) -> usize {
        self.source.generate(0, upper as u64) as usize
    }
}

/// Visits every index in turn, which guarantees every guest is eventually
/// picked.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinSelector {
    next: usize,
}

impl RoundRobinSelector {
    /// Start from index zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GuestSelector for RoundRobinSelector {
    fn select(&mut self, upper: usize) -> usize {
        let index = self.next % (upper + 1);
        self.next = index + 1;
        index
    }
}
