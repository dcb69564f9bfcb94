use std::time::Duration;

use super::stats::Summary;

/// One successful run's metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub elapsed: Duration,
    pub sensors: u32,
    pub battery: i64,
}

/// Why a run produced no observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Simulator exited non-zero.
    Invocation,
    /// Simulator exited zero but its output lacked the expected fields.
    Unparseable,
}

/// Accumulates the three result series plus failure counts for one batch.
///
/// The series are private and only grow together through [`Aggregator::record`],
/// so they always have the same length.
#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    times: Vec<f64>,
    sensors: Vec<u32>,
    battery: Vec<i64>,
    invocation_failures: u64,
    unparseable: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, obs: Observation) {
        self.times.push(obs.elapsed.as_secs_f64());
        self.sensors.push(obs.sensors);
        self.battery.push(obs.battery);
    }

    pub fn record_failure(&mut self, kind: FailureKind) {
        match kind {
            FailureKind::Invocation => self.invocation_failures += 1,
            FailureKind::Unparseable => self.unparseable += 1,
        }
    }

    /// Number of observations (the common length of all three series).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn sensors(&self) -> &[u32] {
        &self.sensors
    }

    pub fn battery(&self) -> &[i64] {
        &self.battery
    }

    /// Total run failures of either kind.
    pub fn failed(&self) -> u64 {
        self.invocation_failures + self.unparseable
    }

    pub fn invocation_failures(&self) -> u64 {
        self.invocation_failures
    }

    pub fn unparseable(&self) -> u64 {
        self.unparseable
    }

    pub fn times_summary(&self) -> Summary {
        Summary::from_values(&self.times)
    }

    pub fn sensors_summary(&self) -> Summary {
        let values: Vec<f64> = self.sensors.iter().map(|v| *v as f64).collect();
        Summary::from_values(&values)
    }

    pub fn battery_summary(&self) -> Summary {
        let values: Vec<f64> = self.battery.iter().map(|v| *v as f64).collect();
        Summary::from_values(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(ms: u64, sensors: u32, battery: i64) -> Observation {
        Observation {
            elapsed: Duration::from_millis(ms),
            sensors,
            battery,
        }
    }

    #[test]
    fn test_record_keeps_series_aligned() {
        let mut agg = Aggregator::new();
        assert!(agg.is_empty());
        agg.record(obs(1200, 5, 90));
        agg.record(obs(800, 33, 10));
        assert_eq!(agg.len(), 2);
        assert_eq!(agg.times().len(), agg.sensors().len());
        assert_eq!(agg.sensors().len(), agg.battery().len());
        assert_eq!(agg.sensors(), &[5, 33]);
        assert_eq!(agg.battery(), &[90, 10]);
        assert!((agg.times()[0] - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_failure_touches_no_series() {
        let mut agg = Aggregator::new();
        agg.record(obs(100, 1, 1));
        agg.record_failure(FailureKind::Invocation);
        assert_eq!(agg.failed(), 1);
        assert_eq!(agg.len(), 1);

        agg.record_failure(FailureKind::Unparseable);
        assert_eq!(agg.failed(), 2);
        assert_eq!(agg.invocation_failures(), 1);
        assert_eq!(agg.unparseable(), 1);
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn test_summaries_per_series() {
        let mut agg = Aggregator::new();
        agg.record(obs(1000, 10, 100));
        agg.record(obs(3000, 20, 300));
        assert_eq!(agg.times_summary().mean, 2.0);
        assert_eq!(agg.sensors_summary().mean, 15.0);
        assert_eq!(agg.battery_summary().max, 300.0);
    }
}
