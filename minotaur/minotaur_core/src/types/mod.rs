//! Small data types shared by the simulations.

pub mod room;

pub use room::{RoomStatus, SimulationKind};
