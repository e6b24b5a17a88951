use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic clock the runner measures and waits with.
/// Timestamps are offsets from the timer's own start point.
pub trait Timer: Clone + Send + Sync {
    fn now(&self) -> Duration;
    fn elapsed(&self, since: Duration) -> Duration {
        self.now().saturating_sub(since)
    }
    fn sleep(&self, d: Duration);
}

#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    pub start: Instant,
}

impl Timer for HighPrecisionTimer {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
    fn sleep(&self, d: Duration) {
        self.high_precision_sleep(d)
    }
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn high_precision_sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        #[cfg(target_os = "linux")]
        self.linux_sleep(duration);
        #[cfg(not(target_os = "linux"))]
        std::thread::sleep(duration);
    }

    #[cfg(target_os = "linux")]
    fn linux_sleep(&self, duration: Duration) {
        use libc::{clock_nanosleep, timespec, CLOCK_MONOTONIC};

        let req = timespec {
            tv_sec: duration.as_secs() as libc::time_t,
            tv_nsec: duration.subsec_nanos() as libc::c_long,
        };

        unsafe {
            clock_nanosleep(CLOCK_MONOTONIC, 0, &req, std::ptr::null_mut());
        }
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Virtual clock: `sleep` advances time instantly. Clones share one clock,
/// so a scripted input source can read the time the runner waits on.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    nanos: Arc<AtomicU64>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, d: Duration) {
        self.nanos
            .fetch_add(d.as_nanos().min(u64::MAX as u128) as u64, Ordering::SeqCst);
    }
}

impl Timer for ManualTimer {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }
    fn sleep(&self, d: Duration) {
        self.advance(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_clones_share_time() {
        let a = ManualTimer::new();
        let b = a.clone();
        a.sleep(Duration::from_millis(300));
        b.advance(Duration::from_millis(5));
        assert_eq!(a.now(), Duration::from_millis(305));
        assert_eq!(b.elapsed(Duration::from_millis(300)), Duration::from_millis(5));
    }

    #[test]
    fn test_elapsed_saturates_for_future_timestamps() {
        let t = ManualTimer::new();
        assert_eq!(t.elapsed(Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn test_high_precision_sleep_waits_at_least_requested() {
        let t = HighPrecisionTimer::new();
        let start = t.now();
        t.sleep(Duration::from_millis(2));
        assert!(t.elapsed(start) >= Duration::from_millis(2));
    }
}
