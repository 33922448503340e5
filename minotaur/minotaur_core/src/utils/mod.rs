//! Utility types: configuration and logging helpers.

pub mod config;
pub mod logging;

pub use config::{
    AdmissionStrategy, LabyrinthConfig, PollStrategy, ShowroomConfig, SimulationConfig,
};
pub use logging::LogLevel;
