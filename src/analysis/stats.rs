use serde::{Deserialize, Serialize};

/// Descriptive statistics for one result series.
///
/// Statistics are `NaN` for an empty series; `std` is also `NaN` for a
/// single observation (sample std uses n-1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summary {
    pub count: u64,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len() as u64;
        if values.is_empty() {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                p25: f64::NAN,
                p50: f64::NAN,
                p75: f64::NAN,
                max: f64::NAN,
            };
        }

        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;

        let variance_sum: f64 = values
            .iter()
            .map(|v| {
                let diff = mean - *v;
                diff * diff
            })
            .sum();

        let std = if count > 1 {
            (variance_sum / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            count,
            mean,
            std,
            min: sorted[0],
            p25: percentile(&sorted, 0.25),
            p50: percentile(&sorted, 0.50),
            p75: percentile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        }
    }

    /// Rows in display order: (label, value).
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.p25),
            ("50%", self.p50),
            ("75%", self.p75),
            ("max", self.max),
        ]
    }
}

/// Percentile of an ascending-sorted slice, linear interpolation between
/// closest ranks. `q` is in `[0, 1]`.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summary_basic() {
        let s = Summary::from_values(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert!(close(s.mean, 2.5));
        // Sample variance = 5/3
        assert!(close(s.std, (5.0f64 / 3.0).sqrt()));
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert!(close(s.p25, 1.75));
        assert!(close(s.p50, 2.5));
        assert!(close(s.p75, 3.25));
    }

    #[test]
    fn test_summary_single_value() {
        let s = Summary::from_values(&[7.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 7.0);
        assert!(s.std.is_nan());
        assert_eq!(s.p25, 7.0);
        assert_eq!(s.p75, 7.0);
    }

    #[test]
    fn test_summary_empty() {
        let s = Summary::from_values(&[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.min.is_nan());
        assert!(s.max.is_nan());
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 0.5), 20.0);
        assert_eq!(percentile(&sorted, 0.75), 25.0);
        assert_eq!(percentile(&sorted, 1.0), 30.0);
    }

    #[test]
    fn test_rows_order() {
        let s = Summary::from_values(&[1.0, 2.0]);
        let labels: Vec<_> = s.rows().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]);
    }
}
