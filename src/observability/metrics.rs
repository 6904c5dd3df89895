//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase, reset only on process start
//! - Lock-free; Relaxed ordering is enough for counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::engine::Outcome;

/// Request counters for the explain endpoints
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Texts explained (including empty and fallback)
    requests: AtomicU64,
    /// Texts that were absent or blank
    empty_inputs: AtomicU64,
    /// Texts that matched no concept
    fallbacks: AtomicU64,
    /// Individual concept matches
    rule_matches: AtomicU64,
    /// Requests rejected by the transport
    rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one explained text
    pub fn record(&self, outcome: &Outcome) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        match outcome {
            Outcome::EmptyInput => {
                self.empty_inputs.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Fallback => {
                self.fallbacks.fetch_add(1, Ordering::Relaxed);
            }
            Outcome::Matched(concepts) => {
                self.rule_matches
                    .fetch_add(concepts.len() as u64, Ordering::Relaxed);
            }
        }
    }

    /// Increment rejected requests
    pub fn increment_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            empty_inputs: self.empty_inputs.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            rule_matches: self.rule_matches.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    /// Current snapshot as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub empty_inputs: u64,
    pub fallbacks: u64,
    pub rule_matches: u64,
    pub rejected: u64,
}
