//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Shared primitives and utilities for the dashboard runtime."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Default)]
pub struct JitterHistogram {
    samples: Mutex<Vec<f64>>,
}

impl JitterHistogram {
    pub fn record(&self, jitter: Duration) {
        self.samples.lock().push(jitter.as_secs_f64() * 1_000.0);
    }

    pub fn summary(&self) -> Option<JitterSummary> {
        let samples = self.samples.lock();
        if samples.is_empty() {
            return None;
        }
        let count = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / count;
        let max = samples.iter().copied().fold(f64::MIN, f64::max);
        let min = samples.iter().copied().fold(f64::MAX, f64::min);
        Some(JitterSummary {
            mean_ms: mean,
            max_ms: max,
            min_ms: min,
            samples: samples.len() as u64,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JitterSummary {
    pub mean_ms: f64,
    pub max_ms: f64,
    pub min_ms: f64,
    pub samples: u64,
}

/// Measures how far each refresh cycle drifts from the configured cadence.
#[derive(Debug)]
pub struct RefreshTimer {
    target_interval: Duration,
    last_refresh: Mutex<Option<Instant>>,
    histogram: JitterHistogram,
}

impl RefreshTimer {
    pub fn new(target_interval: Duration) -> Self {
        Self {
            target_interval,
            last_refresh: Mutex::new(None),
            histogram: JitterHistogram::default(),
        }
    }

    pub fn record_refresh(&self) {
        self.record_refresh_at(Instant::now());
    }

    fn record_refresh_at(&self, now: Instant) {
        let mut last = self.last_refresh.lock();
        if let Some(previous) = *last {
            let actual = now.duration_since(previous);
            let jitter = if actual > self.target_interval {
                actual - self.target_interval
            } else {
                self.target_interval - actual
            };
            self.histogram.record(jitter);
        }
        *last = Some(now);
    }

    pub fn histogram(&self) -> &JitterHistogram {
        &self.histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_refresh_records_nothing() {
        let timer = RefreshTimer::new(Duration::from_secs(5));
        timer.record_refresh();
        assert!(timer.histogram().summary().is_none());
    }

    #[test]
    fn jitter_is_measured_against_target() {
        let timer = RefreshTimer::new(Duration::from_secs(5));
        let start = Instant::now();
        timer.record_refresh_at(start);
        timer.record_refresh_at(start + Duration::from_millis(5_200));
        timer.record_refresh_at(start + Duration::from_millis(10_100));
        let summary = timer.histogram().summary().unwrap();
        assert_eq!(summary.samples, 2);
        assert!((summary.max_ms - 200.0).abs() < 1e-6);
        assert!((summary.min_ms - 100.0).abs() < 1e-6);
        assert!((summary.mean_ms - 150.0).abs() < 1e-6);
    }
}
