//! Actor threads.
//!
//! Each guest is a long-running thread of its own. `ThreadGroup` starts them,
//! names them after their guest, and joins them when the game is over.

pub mod thread;

pub use thread::{ThreadGroup, ThreadGroupConfig};
