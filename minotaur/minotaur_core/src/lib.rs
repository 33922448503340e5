//! # Minotaur Core
//!
//! `minotaur_core` provides the building blocks shared by the Minotaur party
//! simulations: error types, guest identifiers, configuration, the random
//! source abstraction and the `Simulation` trait.
//!
//! ## The Party
//!
//! The Minotaur invites N guests and runs two games with them:
//!
//! 1. **The Labyrinth**: guests are sent into a labyrinth one at a time, chosen at
//!    random. At the exit sits a cupcake. Guests may eat it or leave it, and may
//!    ask for a new one. One guest (the leader) is the only one who ever asks for
//!    a replacement, and counts every replacement. When the count reaches N, every
//!    guest has been in the labyrinth.
//!
//! 2. **The Showroom**: a single crystal vase sits in a room that fits one guest.
//!    A sign on the door reads `AVAILABLE` or `BUSY`. Every guest wants to see the
//!    vase exactly once.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Minotaur components
//! - **id**: The guest identifier
//! - **traits**: Random sources and the simulation interface
//! - **types**: Small shared data types
//! - **utils**: Configuration and logging helpers

pub mod error;
pub mod id;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export key types and traits for convenience
pub use error::{Error, Result};
pub use id::GuestId;
pub use traits::{EntropyRandom, RandomSource, SeededRandom, Simulation};
pub use types::{RoomStatus, SimulationKind};
pub use utils::{
    AdmissionStrategy, LabyrinthConfig, LogLevel, PollStrategy, ShowroomConfig, SimulationConfig,
};
