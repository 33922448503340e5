//! Simulation configuration.
//!
//! Every knob has a default matching the classic party: fifty guests, a vase
//! admired for 10 to 500 milliseconds, and guests that yield the processor
//! between polls. Configuration can be read from a TOML file:
//!
//! ```toml
//! guest_count = 20
//! seed = 7
//!
//! [poll]
//! strategy = "backoff"
//! initial_us = 10
//! max_us = 2000
//!
//! [labyrinth]
//! selection_dwell_us = 50
//!
//! [showroom]
//! min_hold_ms = 10
//! max_hold_ms = 500
//! admission = "queue"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// How an actor waits between two looks at the shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum PollStrategy {
    /// Spin on the CPU with a spin-loop hint.
    Spin,

    /// Give the rest of the time slice to another thread.
    #[default]
    Yield,

    /// Sleep, doubling the pause after each unproductive poll up to a cap.
    Backoff {
        /// First pause, in microseconds
        initial_us: u64,
        /// Largest pause, in microseconds
        max_us: u64,
    },
}

/// How guests are admitted to the showroom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStrategy {
    /// Whoever sees the `AVAILABLE` sign first walks in.
    #[default]
    Sign,

    /// Guests line up once; only the head of the line may walk in.
    Queue,
}

/// Settings for the labyrinth game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabyrinthConfig {
    /// How long the driver keeps a guest in the labyrinth before picking the
    /// next one. Zero means the driver only yields between picks.
    pub selection_dwell_us: u64,
}

impl LabyrinthConfig {
    /// The dwell as a `Duration`.
    pub fn selection_dwell(&self) -> Duration {
        Duration::from_micros(self.selection_dwell_us)
    }
}

/// Settings for the showroom game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowroomConfig {
    /// Shortest time a guest spends with the vase, in milliseconds
    pub min_hold_ms: u64,

    /// Longest time a guest spends with the vase, in milliseconds
    pub max_hold_ms: u64,

    /// Admission discipline at the door
    pub admission: AdmissionStrategy,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            min_hold_ms: 10,
            max_hold_ms: 500,
            admission: AdmissionStrategy::default(),
        }
    }
}

/// Top-level configuration shared by both games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of guests at the party
    pub guest_count: usize,

    /// Seed for reproducible random draws; entropy is used when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Polling behavior of every actor
    pub poll: PollStrategy,

    /// Labyrinth settings
    pub labyrinth: LabyrinthConfig,

    /// Showroom settings
    pub showroom: ShowroomConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            guest_count: Self::DEFAULT_GUEST_COUNT,
            seed: None,
            poll: PollStrategy::default(),
            labyrinth: LabyrinthConfig::default(),
            showroom: ShowroomConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Guests invited when nothing else is configured.
    pub const DEFAULT_GUEST_COUNT: usize = 50;

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        log::debug!(
            "Loaded configuration from {}: {} guests",
            path.as_ref().display(),
            config.guest_count
        );
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check the configuration for values no run could work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.guest_count == 0 {
            return Err(ConfigError::NoGuests);
        }

        if self.showroom.min_hold_ms > self.showroom.max_hold_ms {
            return Err(ConfigError::InvalidHoldRange {
                min: self.showroom.min_hold_ms,
                max: self.showroom.max_hold_ms,
            });
        }

        if let PollStrategy::Backoff { initial_us, max_us } = self.poll {
            if initial_us == 0 || initial_us > max_us {
                return Err(ConfigError::InvalidBackoff {
                    initial: initial_us,
                    max: max_us,
                });
            }
        }

        Ok(())
    }

    /// Replace the guest count.
    pub fn with_guest_count(mut self, guest_count: usize) -> Self {
        self.guest_count = guest_count;
        self
    }

    /// Replace the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the polling strategy.
    pub fn with_poll(mut self, poll: PollStrategy) -> Self {
        self.poll = poll;
        self
    }
}
