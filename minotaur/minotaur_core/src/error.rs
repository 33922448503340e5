//! Error types for the Minotaur simulations.
//!
//! The root error type, `Error`, wraps the subsystem-specific errors so that
//! callers can use a single `Result` alias at the top level.

use crate::id::GuestId;
use thiserror::Error;

/// Root error type for the Minotaur simulations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Thread and synchronization errors
    #[error("Concurrency error: {0}")]
    Concurrency(#[from] ConcurrencyError),

    /// A protocol finished in a state that violates its invariants
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A party needs at least one guest
    #[error("guest count must be at least 1")]
    NoGuests,

    /// The hold range is inverted
    #[error("minimum hold ({min}ms) is greater than maximum hold ({max}ms)")]
    InvalidHoldRange {
        /// Configured minimum, in milliseconds
        min: u64,
        /// Configured maximum, in milliseconds
        max: u64,
    },

    /// The backoff range is inverted or empty
    #[error("backoff must satisfy 0 < initial ({initial}us) <= max ({max}us)")]
    InvalidBackoff {
        /// Initial pause, in microseconds
        initial: u64,
        /// Maximum pause, in microseconds
        max: u64,
    },

    /// The configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors related to actor threads.
#[derive(Debug, Error)]
pub enum ConcurrencyError {
    /// The OS refused to start an actor thread
    #[error("failed to spawn thread '{name}': {source}")]
    SpawnFailed {
        /// Name of the thread that could not be started
        name: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// An actor thread panicked before finishing
    #[error("thread '{0}' panicked")]
    ThreadPanicked(String),
}

/// Errors raised when a finished protocol does not satisfy its invariants.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The run ended before every guest was counted or admitted
    #[error("run ended with {actual} of {expected} guests accounted for")]
    Incomplete {
        /// Number of guests in the party
        expected: usize,
        /// Number of guests accounted for when the run ended
        actual: usize,
    },

    /// A guest was recorded twice
    #[error("{0} was recorded more than once")]
    DuplicateVisit(GuestId),

    /// A guest tried to leave a room it does not occupy
    #[error("{guest} left the room but the occupant was {occupant:?}")]
    NotOccupant {
        /// The guest that tried to leave
        guest: GuestId,
        /// The recorded occupant, if any
        occupant: Option<GuestId>,
    },
}

/// Result type used throughout the Minotaur crates.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: Error = ConfigError::NoGuests.into();
        assert!(matches!(err, Error::Config(ConfigError::NoGuests)));
        assert_eq!(
            err.to_string(),
            "Configuration error: guest count must be at least 1"
        );

        let err: Error = ProtocolError::DuplicateVisit(GuestId::new(4)).into();
        assert_eq!(
            err.to_string(),
            "Protocol error: Guest #4 was recorded more than once"
        );
    }

    #[test]
    fn test_spawn_failed_has_source() {
        use std::error::Error as _;

        let err = ConcurrencyError::SpawnFailed {
            name: "guest-3".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "out of threads"),
        };

        assert!(err.source().is_some());
        assert!(err.to_string().contains("guest-3"));
    }
}
