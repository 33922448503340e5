//! Atomic flags and the published guest index.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A flag that is set once and read by many threads.
#[derive(Debug)]
pub struct AtomicFlag {
    /// The flag value
    flag: AtomicBool,
}

impl AtomicFlag {
    /// Create a new atomic flag with the specified initial state.
    pub fn new(initial_state: bool) -> Self {
        Self {
            flag: AtomicBool::new(initial_state),
        }
    }

    /// Set the flag to true and return the previous value.
    pub fn set(&self) -> bool {
        self.flag.swap(true, Ordering::SeqCst)
    }

    /// Get the current state of the flag.
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Run `f`, setting the flag if it returns an error or panics.
    pub fn set_on_failure<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let guard = SetOnDrop { flag: self };
        let result = f();
        if result.is_ok() {
            std::mem::forget(guard);
        }
        result
    }
}

/// Sets the flag when dropped, including while unwinding.
struct SetOnDrop<'a> {
    flag: &'a AtomicFlag,
}

impl Drop for SetOnDrop<'_> {
    fn drop(&mut self) {
        self.flag.set();
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

/// An index published by one thread and observed by many.
///
/// Stores use release ordering and loads use acquire ordering, so a reader that
/// sees a new index also sees everything the writer did before publishing it.
#[derive(Debug)]
pub struct AtomicIndex {
    value: AtomicUsize,
}

impl AtomicIndex {
    /// Create a new index holding `initial`.
    pub fn new(initial: usize) -> Self {
        Self {
            value: AtomicUsize::new(initial),
        }
    }

    /// Publish a new index and return the previous one.
    pub fn publish(&self, index: usize) -> usize {
        self.value.swap(index, Ordering::AcqRel)
    }

    /// Read the most recently published index.
    pub fn current(&self) -> usize {
        self.value.load(Ordering::Acquire)
    }
}
