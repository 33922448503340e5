//! Synchronization primitives for the party games.
//!
//! - Atomic flags and indices for lock-free signalling
//! - A mutex that keeps statistics about how it is used
//! - A poller that paces actors between looks at the shared state

pub mod atomic;
pub mod lock;
pub mod poll;

// Re-export key types from atomic
pub use atomic::{AtomicFlag, AtomicIndex};

// Re-export key types from lock
pub use lock::{LockStats, TrackedMutex, TrackedMutexGuard};

// Re-export key types from poll
pub use poll::Poller;
