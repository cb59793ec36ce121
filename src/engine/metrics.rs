//! RECSTORE - Store Metrics
//! Atomic operation counters for the record store, updated without locks
//! through `AtomicU64`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::mutation::Mutation;

/// Atomic operation counters for the record store.
///
/// All counters use `Ordering::Relaxed`; they are read for reporting only
/// and never used for synchronization.
#[derive(Debug)]
pub struct StoreMetrics {
    /// Total number of `put` operations.
    pub puts: AtomicU64,
    /// Total number of record reads (`get`, `get_bins`, `get_header`), batch elements included.
    pub gets: AtomicU64,
    /// Total number of `delete` operations.
    pub deletes: AtomicU64,
    /// Total number of existence checks, batch elements included.
    pub exists_checks: AtomicU64,
    /// Total number of `touch` operations.
    pub touches: AtomicU64,
    /// Total number of `append` operations.
    pub appends: AtomicU64,
    /// Total number of `prepend` operations.
    pub prepends: AtomicU64,
    /// Total number of `add` operations.
    pub adds: AtomicU64,
    /// Total number of `operate` calls.
    pub operates: AtomicU64,
    /// Reads and touches that found no record.
    pub misses: AtomicU64,
    /// Mutations rejected with a type mismatch.
    pub type_mismatches: AtomicU64,
    /// Encoded size of all bins written.
    pub bytes_written: AtomicU64,
    started: Instant,
}

impl StoreMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self {
            puts: AtomicU64::new(0),
            gets: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
            exists_checks: AtomicU64::new(0),
            touches: AtomicU64::new(0),
            appends: AtomicU64::new(0),
            prepends: AtomicU64::new(0),
            adds: AtomicU64::new(0),
            operates: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            type_mismatches: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn record_put(&self, bytes: u64) {
        self.puts.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_get(&self, hit: bool) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_exists(&self) {
        self.exists_checks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_touch(&self, hit: bool) {
        self.touches.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_mutation(&self, mutation: Mutation, bytes: u64) {
        let counter = match mutation {
            Mutation::Append => &self.appends,
            Mutation::Prepend => &self.prepends,
            Mutation::Add => &self.adds,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_operate(&self, bytes: u64) {
        self.operates.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_type_mismatch(&self) {
        self.type_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    /// Seconds since the store was opened.
    pub fn uptime_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Total number of operations across every counter kind.
    pub fn total_ops(&self) -> u64 {
        [
            &self.puts,
            &self.gets,
            &self.deletes,
            &self.exists_checks,
            &self.touches,
            &self.appends,
            &self.prepends,
            &self.adds,
            &self.operates,
        ]
        .iter()
        .map(|c| c.load(Ordering::Relaxed))
        .sum()
    }

    pub fn ops_per_sec(&self) -> f64 {
        let uptime = self.uptime_secs();
        if uptime < 0.001 {
            return 0.0;
        }
        self.total_ops() as f64 / uptime
    }

    /// Format metrics as a human-readable report.
    pub fn report(&self) -> String {
        format!(
            "\n═══ RECSTORE Metrics ═══\n\
             Operations:\n\
               puts:       {}\n\
               gets:       {}\n\
               deletes:    {}\n\
               exists:     {}\n\
               touches:    {}\n\
               appends:    {}\n\
               prepends:   {}\n\
               adds:       {}\n\
               operates:   {}\n\
             Throughput:\n\
               total ops:  {}\n\
               ops/sec:    {:.2}\n\
             Outcomes:\n\
               misses:     {}\n\
               mismatches: {}\n\
               written:    {} bytes\n\
             Uptime: {:.2}s",
            self.puts.load(Ordering::Relaxed),
            self.gets.load(Ordering::Relaxed),
            self.deletes.load(Ordering::Relaxed),
            self.exists_checks.load(Ordering::Relaxed),
            self.touches.load(Ordering::Relaxed),
            self.appends.load(Ordering::Relaxed),
            self.prepends.load(Ordering::Relaxed),
            self.adds.load(Ordering::Relaxed),
            self.operates.load(Ordering::Relaxed),
            self.total_ops(),
            self.ops_per_sec(),
            self.misses.load(Ordering::Relaxed),
            self.type_mismatches.load(Ordering::Relaxed),
            self.bytes_written.load(Ordering::Relaxed),
            self.uptime_secs(),
        )
    }
}

impl Default for StoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_operations() {
        let m = StoreMetrics::new();

        m.record_put(10);
        m.record_put(5);
        m.record_get(true);
        m.record_get(false);
        m.record_delete();
        m.record_touch(false);
        m.record_mutation(Mutation::Append, 3);
        m.record_mutation(Mutation::Add, 2);
        m.record_type_mismatch();

        assert_eq!(m.puts.load(Ordering::Relaxed), 2);
        assert_eq!(m.gets.load(Ordering::Relaxed), 2);
        assert_eq!(m.misses.load(Ordering::Relaxed), 2);
        assert_eq!(m.appends.load(Ordering::Relaxed), 1);
        assert_eq!(m.adds.load(Ordering::Relaxed), 1);
        assert_eq!(m.prepends.load(Ordering::Relaxed), 0);
        assert_eq!(m.type_mismatches.load(Ordering::Relaxed), 1);
        assert_eq!(m.bytes_written.load(Ordering::Relaxed), 20);
    }

    #[test]
    fn test_total_ops() {
        let m = StoreMetrics::new();
        m.record_put(1);
        m.record_get(true);
        m.record_delete();
        m.record_exists();
        m.record_operate(0);
        m.record_type_mismatch(); // outcome, not an operation
        assert_eq!(m.total_ops(), 5);
    }

    #[test]
    fn test_report_format() {
        let m = StoreMetrics::default();
        m.record_put(8);
        let report = m.report();
        assert!(report.contains("puts:"));
        assert!(report.contains("ops/sec:"));
        assert!(report.contains("8 bytes"));
    }
}
