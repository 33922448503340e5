#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # Minotaur Party
//!
//! The two party games, each a closed system of guest threads around one
//! lock-guarded shared state:
//!
//! - **labyrinth**: counting every guest with a single cupcake. Only the leader
//!   (guest 0) may ask for a new cupcake, and counts each time it does.
//! - **showroom**: mutual exclusion over a single room holding a crystal vase,
//!   with an `AVAILABLE`/`BUSY` sign on the door.
//!
//! Both games run until every guest has been accounted for, join their threads,
//! and return a report.

pub mod labyrinth;
pub mod report;
pub mod showroom;

pub use labyrinth::{
    CupcakeEvent, GuestSelector, Labyrinth, LabyrinthReport, PartyState, RandomSelector,
    RoundRobinSelector,
};
pub use report::LockSummary;
pub use showroom::{Showroom, ShowroomReport, ShowroomState, Visit};
