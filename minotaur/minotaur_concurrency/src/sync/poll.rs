//! Pacing for actors that poll shared state.
//!
//! Guests in both games repeatedly take the lock, look around, and let go. A
//! `Poller` decides what a guest does between two looks. With backoff, every
//! unproductive look doubles the pause until it reaches the cap; a productive
//! look resets it.

use std::time::Duration;

use minotaur_core::PollStrategy;

/// Executes a `PollStrategy` for one actor.
#[derive(Debug, Clone)]
pub struct Poller {
    strategy: PollStrategy,
    current: Duration,
}

impl Poller {
    /// Create a poller for the given strategy.
    pub fn new(strategy: PollStrategy) -> Self {
        Self {
            strategy,
            current: initial_pause(strategy),
        }
    }

    /// Wait between two polls.
    pub fn pause(&mut self) {
        match self.strategy {
            PollStrategy::Spin => std::hint::spin_loop(),
            PollStrategy::Yield => std::thread::yield_now(),
            PollStrategy::Backoff { max_us, .. } => {
                std::thread::sleep(self.current);
                self.current = (self.current * 2).min(Duration::from_micros(max_us));
            }
        }
    }

    /// Forget accumulated backoff after a productive poll.
    pub fn reset(&mut self) {
        self.current = initial_pause(self.strategy);
    }

    /// The pause the next call to `pause` will sleep for under backoff.
    pub fn next_pause(&self) -> Duration {
        self.current
    }

    /// The strategy this poller follows.
    pub fn strategy(&self) -> PollStrategy {
        self.strategy
    }
}

fn initial_pause(strategy: PollStrategy) -> Duration {
    match strategy {
        PollStrategy::Backoff { initial_us, .. } => Duration::from_micros(initial_us),
        PollStrategy::Spin | PollStrategy::Yield => Duration::ZERO,
    }
}
