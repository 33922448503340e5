//! A mutex that keeps statistics.
//!
//! Every shared state block in the party games sits behind one of these. The
//! statistics show how hard the guests fought over the lock.

use log::trace;
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Statistics about lock usage
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LockStats {
    /// Number of successful lock acquisitions
    pub acquisition_count: usize,

    /// Total time spent waiting for the lock (microseconds)
    pub total_wait_time_us: u64,

    /// Total time the lock was held (microseconds)
    pub total_hold_time_us: u64,

    /// Maximum time spent waiting for the lock (microseconds)
    pub max_wait_time_us: u64,

    /// Maximum time the lock was held (microseconds)
    pub max_hold_time_us: u64,
}

/// A mutex with statistics
pub struct TrackedMutex<T> {
    /// The underlying mutex
    mutex: Mutex<T>,

    /// Statistics about lock usage
    stats: TrackedMutexStats,

    /// Name of this mutex for debugging
    name: Option<String>,
}

/// Statistics for TrackedMutex
#[derive(Debug, Default)]
struct TrackedMutexStats {
    acquisition_count: AtomicUsize,
    total_wait_time_us: AtomicUsize,
    total_hold_time_us: AtomicUsize,
    max_wait_time_us: AtomicUsize,
    max_hold_time_us: AtomicUsize,
}

impl TrackedMutexStats {
    fn record_wait(&self, wait_time_us: usize) {
        self.total_wait_time_us
            .fetch_add(wait_time_us, Ordering::Relaxed);
        raise_max(&self.max_wait_time_us, wait_time_us);
        self.acquisition_count.fetch_add(1, Ordering::Relaxed);
    }

    fn record_hold(&self, hold_time_us: usize) {
        self.total_hold_time_us
            .fetch_add(hold_time_us, Ordering::Relaxed);
        raise_max(&self.max_hold_time_us, hold_time_us);
    }
}

/// Raise `slot` to `value` if `value` is larger, retrying on contention.
fn raise_max(slot: &AtomicUsize, value: usize) {
    let mut current_max = slot.load(Ordering::Relaxed);

    while value > current_max {
        match slot.compare_exchange(current_max, value, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => break,
            Err(actual) => current_max = actual,
        }
    }
}

/// A guard for a TrackedMutex
pub struct TrackedMutexGuard<'a, T> {
    /// The underlying mutex guard
    guard: MutexGuard<'a, T>,

    /// When the lock was acquired
    acquired_at: Instant,

    /// Statistics for this mutex
    stats: &'a TrackedMutexStats,

    /// Name of the mutex
    name: Option<&'a str>,
}

impl<T> TrackedMutex<T> {
    /// Create a new tracked mutex
    pub fn new(value: T) -> Self {
        Self {
            mutex: Mutex::new(value),
            stats: TrackedMutexStats::default(),
            name: None,
        }
    }

    /// Create a new tracked mutex with a name for debugging
    pub fn with_name(value: T, name: impl Into<String>) -> Self {
        Self {
            mutex: Mutex::new(value),
            stats: TrackedMutexStats::default(),
            name: Some(name.into()),
        }
    }

    /// Lock the mutex
    pub fn lock(&self) -> TrackedMutexGuard<'_, T> {
        let start = Instant::now();
        let guard = self.mutex.lock();
        let wait_time = start.elapsed();

        self.stats.record_wait(wait_time.as_micros() as usize);

        trace!(
            "Lock acquired: {} (wait time: {:.2}ms)",
            self.name.as_deref().unwrap_or("unnamed"),
            wait_time.as_secs_f64() * 1000.0
        );

        TrackedMutexGuard {
            guard,
            acquired_at: Instant::now(),
            stats: &self.stats,
            name: self.name.as_deref(),
        }
    }

    /// Get the statistics for this mutex
    pub fn stats(&self) -> LockStats {
        LockStats {
            acquisition_count: self.stats.acquisition_count.load(Ordering::Relaxed),
            total_wait_time_us: self.stats.total_wait_time_us.load(Ordering::Relaxed) as u64,
            total_hold_time_us: self.stats.total_hold_time_us.load(Ordering::Relaxed) as u64,
            max_wait_time_us: self.stats.max_wait_time_us.load(Ordering::Relaxed) as u64,
            max_hold_time_us: self.stats.max_hold_time_us.load(Ordering::Relaxed) as u64,
        }
    }

    /// Consume the mutex and return the protected value.
    pub fn into_inner(self) -> T {
        self.mutex.into_inner()
    }
}

impl LockStats {
    /// Get the contention factor (higher means more contention)
    pub fn contention_factor(&self) -> f64 {
        if self.acquisition_count == 0 || self.total_hold_time_us == 0 {
            return 0.0;
        }

        let avg_wait_time = self.total_wait_time_us as f64 / self.acquisition_count as f64;
        let avg_hold_time = self.total_hold_time_us as f64 / self.acquisition_count as f64;

        avg_wait_time / avg_hold_time
    }
}

impl<T> Drop for TrackedMutexGuard<'_, T> {
    fn drop(&mut self) {
        let hold_time = self.acquired_at.elapsed();
        self.stats.record_hold(hold_time.as_micros() as usize);

        trace!(
            "Lock released: {} (held for: {:.2}ms)",
            self.name.unwrap_or("unnamed"),
            hold_time.as_secs_f64() * 1000.0
        );
    }
}

impl<T> std::ops::Deref for TrackedMutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<T> std::ops::DerefMut for TrackedMutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_tracked_mutex_basic() {
        let mutex = TrackedMutex::with_name(0, "test_mutex");

        {
            let mut guard = mutex.lock();
            *guard += 1;
        }

        assert_eq!(*mutex.lock(), 1);

        let stats = mutex.stats();
        assert_eq!(stats.acquisition_count, 2);
    }

    #[test]
    fn test_hold_time_recorded() {
        let mutex = TrackedMutex::new(());

        {
            let _guard = mutex.lock();
            thread::sleep(Duration::from_millis(5));
        }

        let stats = mutex.stats();
        assert!(stats.max_hold_time_us >= 5_000);
        assert!(stats.total_hold_time_us >= stats.max_hold_time_us);
    }

    #[test]
    fn test_tracked_mutex_threads() {
        let mutex = Arc::new(TrackedMutex::new(0usize));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let mutex = Arc::clone(&mutex);
                thread::spawn(move || {
                    for _ in 0..500 {
                        *mutex.lock() += 1;
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*mutex.lock(), 4000);
        assert_eq!(mutex.stats().acquisition_count, 4001);
    }

    #[test]
    fn test_contention_factor() {
        assert_eq!(LockStats::default().contention_factor(), 0.0);

        let stats = LockStats {
            acquisition_count: 4,
            total_wait_time_us: 400,
            total_hold_time_us: 200,
            max_wait_time_us: 100,
            max_hold_time_us: 50,
        };
        assert!((stats.contention_factor() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_into_inner() {
        let mutex = TrackedMutex::new(vec![1, 2]);
        mutex.lock().push(3);
        assert_eq!(mutex.into_inner(), vec![1, 2, 3]);
    }
}
