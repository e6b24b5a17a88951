use std::time::Duration;

/// Precision summary of fixed-duration waits.
#[derive(Debug, Clone, PartialEq)]
pub struct WaitStats {
    pub count: usize,
    /// Waits that measured shorter than their target.
    pub underruns: usize,
    pub mean_error_ns: f64,
    pub jitter_ns: f64,
    pub max_overshoot_ns: f64,
}

/// Keeps the signed error (measured − target) of the most recent waits.
#[derive(Debug, Clone)]
pub struct WaitRecorder {
    errors_ns: Vec<f64>,
    underruns: usize,
    max_samples: usize,
}

impl WaitRecorder {
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        Self {
            errors_ns: Vec::with_capacity(max_samples),
            underruns: 0,
            max_samples: max_samples.max(1),
        }
    }

    pub fn record(&mut self, target: Duration, measured: Duration) {
        if measured < target {
            self.underruns += 1;
        }
        if self.errors_ns.len() >= self.max_samples {
            self.errors_ns.remove(0);
        }
        self.errors_ns
            .push(measured.as_nanos() as f64 - target.as_nanos() as f64);
    }

    pub fn stats(&self) -> WaitStats {
        if self.errors_ns.is_empty() {
            return WaitStats {
                count: 0,
                underruns: self.underruns,
                mean_error_ns: 0.0,
                jitter_ns: 0.0,
                max_overshoot_ns: 0.0,
            };
        }
        let n = self.errors_ns.len() as f64;
        let mean = self.errors_ns.iter().sum::<f64>() / n;
        let var = self
            .errors_ns
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / n;
        let max = self.errors_ns.iter().cloned().fold(0.0, f64::max);
        WaitStats {
            count: self.errors_ns.len(),
            underruns: self.underruns,
            mean_error_ns: mean,
            jitter_ns: var.sqrt(),
            max_overshoot_ns: max,
        }
    }
}

impl Default for WaitRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_recorder_reports_zeroes() {
        let stats = WaitRecorder::new().stats();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.jitter_ns, 0.0);
    }

    #[test]
    fn test_underrun_counted_and_error_signed() {
        let mut rec = WaitRecorder::new();
        rec.record(Duration::from_micros(300), Duration::from_micros(299));
        rec.record(Duration::from_micros(300), Duration::from_micros(303));
        let stats = rec.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.underruns, 1);
        assert_eq!(stats.mean_error_ns, 1_000.0);
        assert_eq!(stats.jitter_ns, 2_000.0);
        assert_eq!(stats.max_overshoot_ns, 3_000.0);
    }

    #[test]
    fn test_window_keeps_latest_samples() {
        let mut rec = WaitRecorder::with_capacity(2);
        rec.record(Duration::ZERO, Duration::from_nanos(100));
        rec.record(Duration::ZERO, Duration::from_nanos(10));
        rec.record(Duration::ZERO, Duration::from_nanos(20));
        let stats = rec.stats();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.max_overshoot_ns, 20.0);
    }
}
