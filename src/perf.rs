//! Wall-clock instrumentation for named operations.
//!
//! [`PerformanceMonitor::track`] wraps a unit of work, measures its
//! duration, and folds it into per-operation aggregate statistics. The
//! wrapper is transparent: the wrapped closure's return value passes
//! through untouched, and since failures are ordinary `Result` values
//! they are timed exactly like successes.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Aggregate timing statistics for one named operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationStats {
    /// Number of completed invocations.
    pub count: u64,
    /// Sum of all invocation durations.
    pub total_time: Duration,
    /// Shortest observed invocation.
    pub min_time: Duration,
    /// Longest observed invocation.
    pub max_time: Duration,
}

impl OperationStats {
    fn first(duration: Duration) -> Self {
        Self {
            count: 1,
            total_time: duration,
            min_time: duration,
            max_time: duration,
        }
    }

    fn record(&mut self, duration: Duration) {
        self.count += 1;
        self.total_time += duration;
        self.min_time = self.min_time.min(duration);
        self.max_time = self.max_time.max(duration);
    }

    /// Mean invocation duration.
    #[must_use]
    pub fn avg_time(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total_time / u32::try_from(self.count).unwrap_or(u32::MAX)
        }
    }
}

impl Serialize for OperationStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OperationStats", 5)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("total_ms", &to_millis(self.total_time))?;
        state.serialize_field("min_ms", &to_millis(self.min_time))?;
        state.serialize_field("max_ms", &to_millis(self.max_time))?;
        state.serialize_field("avg_ms", &to_millis(self.avg_time()))?;
        state.end()
    }
}

fn to_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Thread-safe monitor aggregating [`OperationStats`] by operation name.
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    stats: Mutex<HashMap<String, OperationStats>>,
}

impl PerformanceMonitor {
    /// Create an empty monitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide monitor instance.
    ///
    /// Statistics live for the process lifetime and are reset only via
    /// [`reset`](Self::reset); nothing persists across restarts.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<PerformanceMonitor> = OnceLock::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Run `op`, timing it under `name`.
    ///
    /// The return value (success or error) passes through unchanged;
    /// statistics are updated exactly once per invocation.
    pub fn track<T>(&self, name: &str, op: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = op();
        self.record(name, start.elapsed());
        result
    }

    /// Fold one observed duration into the statistics for `name`.
    pub fn record(&self, name: &str, duration: Duration) {
        let mut stats = self.stats.lock().unwrap();
        stats
            .entry(name.to_string())
            .and_modify(|entry| entry.record(duration))
            .or_insert_with(|| OperationStats::first(duration));
    }

    /// Statistics for one operation, if it has been tracked.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<OperationStats> {
        self.stats.lock().unwrap().get(name).copied()
    }

    /// Snapshot of every tracked operation, sorted by name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, OperationStats> {
        self.stats
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Reset statistics for one operation, or all of them.
    pub fn reset(&self, name: Option<&str>) {
        let mut stats = self.stats.lock().unwrap();
        match name {
            Some(name) => {
                stats.remove(name);
            }
            None => stats.clear(),
        }
    }
}
