//! Per-definition circuit breaker.
//!
//! The failure counter map is the only shared mutable state in the crate.
//! It is owned by the orchestrator and exposed solely through
//! `record_outcome` / `is_disabled` — consulted read-before-admit for
//! every execution of a definition.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;

use super::QueryOutcome;
use crate::config::BreakerSettings;

/// Tracks consecutive failures per definition name.
///
/// When enabled, a definition whose counter reaches the threshold is
/// refused until a success resets it. Disabled trackers admit everything
/// and count nothing.
#[derive(Debug)]
pub struct FailureTracker {
    enabled: bool,
    threshold: u32,
    counters: DashMap<String, AtomicU32>,
}

impl FailureTracker {
    pub fn new(enabled: bool, threshold: u32) -> Self {
        Self {
            enabled,
            threshold,
            counters: DashMap::new(),
        }
    }

    pub fn from_settings(settings: &BreakerSettings) -> Self {
        Self::new(settings.enabled, settings.failure_threshold)
    }

    /// Whether executions of this definition are currently refused.
    pub fn is_disabled(&self, name: &str) -> bool {
        if !self.enabled {
            return false;
        }
        self.counters
            .get(name)
            .map(|c| c.load(Ordering::Relaxed) >= self.threshold)
            .unwrap_or(false)
    }

    /// Record one terminal outcome for a definition.
    pub fn record_outcome(&self, name: &str, outcome: QueryOutcome) {
        if !self.enabled {
            return;
        }
        if outcome.is_failure() {
            self.counters
                .entry(name.to_string())
                .or_insert_with(|| AtomicU32::new(0))
                .fetch_add(1, Ordering::Relaxed);
        } else if let Some(counter) = self.counters.get(name) {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Current consecutive-failure count for a definition.
    pub fn failures(&self, name: &str) -> u32 {
        self.counters
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}
