//! Pieces shared by both game reports.

use std::time::Duration;

use minotaur_concurrency::LockStats;
use serde::Serialize;

/// How the shared lock was used during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockSummary {
    /// Number of times any guest took the lock
    pub acquisitions: usize,

    /// Longest wait for the lock, in microseconds
    pub max_wait_us: u64,

    /// Longest time the lock was held, in microseconds
    pub max_hold_us: u64,

    /// Average wait divided by average hold
    pub contention_factor: f64,
}

impl From<LockStats> for LockSummary {
    fn from(stats: LockStats) -> Self {
        Self {
            acquisitions: stats.acquisition_count,
            max_wait_us: stats.max_wait_time_us,
            max_hold_us: stats.max_hold_time_us,
            contention_factor: stats.contention_factor(),
        }
    }
}

/// Wall-clock time as fractional milliseconds.
pub(crate) fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_stats() {
        let stats = LockStats {
            acquisition_count: 10,
            total_wait_time_us: 50,
            total_hold_time_us: 100,
            max_wait_time_us: 20,
            max_hold_time_us: 30,
        };

        let summary = LockSummary::from(stats);
        assert_eq!(summary.acquisitions, 10);
        assert_eq!(summary.max_wait_us, 20);
        assert_eq!(summary.max_hold_us, 30);
        assert!((summary.contention_factor - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_millis() {
        assert!((millis(Duration::from_micros(1500)) - 1.5).abs() < 1e-9);
    }
}
