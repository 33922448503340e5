//! The simulation interface.

use std::fmt::Display;

use serde::Serialize;

use crate::error::Result;
use crate::types::SimulationKind;

/// A party game that runs its actors to completion and reports on the run.
///
/// Each call to `run` builds fresh shared state; nothing carries over between
/// runs.
pub trait Simulation {
    /// Summary produced by a finished run.
    type Report: Serialize + Display;

    /// Which game this is.
    fn kind(&self) -> SimulationKind;

    /// Number of guests taking part.
    fn guest_count(&self) -> usize;

    /// Run the game until every guest has been accounted for.
    ///
    /// # Errors
    ///
    /// Returns an error if an actor thread cannot be started or panics, or if
    /// the finished state violates the game's invariants.
    fn run(&mut self) -> Result<Self::Report>;
}
