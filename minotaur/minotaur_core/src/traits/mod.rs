//! Interfaces at the edges of the simulations.
//!
//! - `RandomSource`: where selections and hold durations come from
//! - `Simulation`: a runnable party game producing a report

pub mod random;
pub mod simulation;

pub use random::{EntropyRandom, RandomSource, SeededRandom};
pub use simulation::Simulation;
