//! Subcommands, one per party game.
//!
//! Each module turns its flags into overrides on top of the loaded
//! `SimulationConfig` and builds the game.

pub mod labyrinth;
pub mod showroom;
