#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # Minotaur Concurrency
//!
//! Synchronization primitives and actor threads for the Minotaur party games.
//!
//! - Tracked locks that record acquisition, wait and hold statistics
//! - Atomic flags and the active-guest index
//! - Polling strategies for actors that repeatedly check shared state
//! - A thread group that starts one named thread per guest and joins them all

/// Actor threads
pub mod pool;

/// Locks, atomics and polling
pub mod sync;

// Re-export key types for easier access
pub use pool::thread::{ThreadGroup, ThreadGroupConfig};
pub use sync::{AtomicFlag, AtomicIndex, LockStats, Poller, TrackedMutex};
