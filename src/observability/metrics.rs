//! Round-trip counters for the store
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counts every round trip made against a store.
///
/// Uses Relaxed ordering; counters are independent of each other.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    fetches: AtomicU64,
    counts: AtomicU64,
    bulk_updates: AtomicU64,
    bulk_deletes: AtomicU64,
    aggregates: AtomicU64,
    rows_affected: AtomicU64,
}

impl StoreMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_fetches(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_counts(&self) {
        self.counts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_bulk_updates(&self) {
        self.bulk_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_bulk_deletes(&self) {
        self.bulk_deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_aggregates(&self) {
        self.aggregates.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds rows touched by a bulk mutation
    pub fn add_rows_affected(&self, rows: u64) {
        self.rows_affected.fetch_add(rows, Ordering::Relaxed);
    }

    /// Total round trips of any kind
    pub fn round_trips(&self) -> u64 {
        self.snapshot().round_trips()
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            fetches: self.fetches.load(Ordering::Relaxed),
            counts: self.counts.load(Ordering::Relaxed),
            bulk_updates: self.bulk_updates.load(Ordering::Relaxed),
            bulk_deletes: self.bulk_deletes.load(Ordering::Relaxed),
            aggregates: self.aggregates.load(Ordering::Relaxed),
            rows_affected: self.rows_affected.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub fetches: u64,
    pub counts: u64,
    pub bulk_updates: u64,
    pub bulk_deletes: u64,
    pub aggregates: u64,
    pub rows_affected: u64,
}

impl MetricsSnapshot {
    pub fn round_trips(&self) -> u64 {
        self.fetches + self.counts + self.bulk_updates + self.bulk_deletes + self.aggregates
    }

    /// Counter-wise difference against an earlier snapshot
    pub fn since(&self, earlier: &MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            fetches: self.fetches - earlier.fetches,
            counts: self.counts - earlier.counts,
            bulk_updates: self.bulk_updates - earlier.bulk_updates,
            bulk_deletes: self.bulk_deletes - earlier.bulk_deletes,
            aggregates: self.aggregates - earlier.aggregates,
            rows_affected: self.rows_affected - earlier.rows_affected,
        }
    }
}
