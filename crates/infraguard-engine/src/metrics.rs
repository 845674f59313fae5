//! Narrow counter/timer facility.
//!
//! The engine only talks to [`Metrics`]; backends live with the caller.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Process-wide sink for counters and timings. Must tolerate concurrent calls.
pub trait Metrics: Send + Sync + fmt::Debug {
    fn increment(&self, category: &str, name: &str, n: u64);
    fn record(&self, category: &str, name: &str, elapsed: Duration);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    fn increment(&self, _: &str, _: &str, _: u64) {}
    fn record(&self, _: &str, _: &str, _: Duration) {}
}

type Key = (String, String);

/// Keeps everything in memory, keyed by `(category, name)`.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: Mutex<BTreeMap<Key, u64>>,
    timings: Mutex<BTreeMap<Key, Vec<Duration>>>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter; zero if never incremented.
    pub fn counter(&self, category: &str, name: &str) -> u64 {
        let key = (category.to_string(), name.to_string());
        match self.counters.lock() {
            Ok(counters) => counters.get(&key).copied().unwrap_or(0),
            Err(poisoned) => poisoned.into_inner().get(&key).copied().unwrap_or(0),
        }
    }

    /// Every duration recorded for a timer, in recording order.
    pub fn timings(&self, category: &str, name: &str) -> Vec<Duration> {
        let key = (category.to_string(), name.to_string());
        match self.timings.lock() {
            Ok(timings) => timings.get(&key).cloned().unwrap_or_default(),
            Err(poisoned) => poisoned.into_inner().get(&key).cloned().unwrap_or_default(),
        }
    }
}

impl Metrics for InMemoryMetrics {
    fn increment(&self, category: &str, name: &str, n: u64) {
        let mut counters = self.counters.lock().unwrap_or_else(|p| p.into_inner());
        *counters
            .entry((category.to_string(), name.to_string()))
            .or_insert(0) += n;
    }

    fn record(&self, category: &str, name: &str, elapsed: Duration) {
        let mut timings = self.timings.lock().unwrap_or_else(|p| p.into_inner());
        timings
            .entry((category.to_string(), name.to_string()))
            .or_default()
            .push(elapsed);
    }
}

/// Started timer. Records its elapsed time once, on [`Timer::stop`] or on drop.
#[must_use = "a timer records nothing until it is stopped or dropped"]
pub struct Timer<'m> {
    metrics: &'m dyn Metrics,
    category: &'static str,
    name: &'static str,
    started: Option<Instant>,
}

impl<'m> Timer<'m> {
    pub fn start(metrics: &'m dyn Metrics, category: &'static str, name: &'static str) -> Self {
        Self {
            metrics,
            category,
            name,
            started: Some(Instant::now()),
        }
    }

    pub fn stop(mut self) -> Duration {
        self.finish()
    }

    fn finish(&mut self) -> Duration {
        match self.started.take() {
            Some(started) => {
                let elapsed = started.elapsed();
                self.metrics.record(self.category, self.name, elapsed);
                elapsed
            }
            None => Duration::ZERO,
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Named counter handle.
#[derive(Clone, Copy)]
pub struct Counter<'m> {
    metrics: &'m dyn Metrics,
    category: &'static str,
    name: &'static str,
}

impl<'m> Counter<'m> {
    pub fn new(metrics: &'m dyn Metrics, category: &'static str, name: &'static str) -> Self {
        Self {
            metrics,
            category,
            name,
        }
    }

    pub fn increment(&self, n: u64) {
        if n > 0 {
            self.metrics.increment(self.category, self.name, n);
        }
    }
}

/// Start a timer against `metrics`.
pub fn timer<'m>(metrics: &'m dyn Metrics, category: &'static str, name: &'static str) -> Timer<'m> {
    Timer::start(metrics, category, name)
}

/// Counter handle on `metrics`.
pub fn counter<'m>(
    metrics: &'m dyn Metrics,
    category: &'static str,
    name: &'static str,
) -> Counter<'m> {
    Counter::new(metrics, category, name)
}
