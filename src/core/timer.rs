//! Polled Countdown Timer
//!
//! Inter-turn delays are polled once per tick with the host's frame delta.
//! Time is kept as `Duration`, so decay is exact and can never go negative.

use std::time::Duration;
use serde::{Serialize, Deserialize};

/// A countdown drained by externally supplied elapsed time.
///
/// A countdown that was never armed reads as elapsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    /// Create a countdown armed with `duration`.
    pub const fn new(duration: Duration) -> Self {
        Self { remaining: duration }
    }

    /// Subtract `elapsed`, clamping at zero.
    #[inline]
    pub fn decay(&mut self, elapsed: Duration) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }

    /// Time left before the countdown elapses.
    #[inline]
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Has the countdown reached zero?
    #[inline]
    pub fn is_elapsed(&self) -> bool {
        self.remaining.is_zero()
    }
}

/// Convert caller-facing seconds into a `Duration`.
///
/// Returns `None` for negative, NaN or infinite input.
pub fn duration_from_secs(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_clamps_at_zero() {
        let mut timer = Countdown::new(Duration::from_millis(30));
        timer.decay(Duration::from_millis(50));

        assert_eq!(timer.remaining(), Duration::ZERO);
        assert!(timer.is_elapsed());
    }

    #[test]
    fn test_decay_is_boundary_exact() {
        let mut timer = Countdown::new(Duration::from_millis(200));
        for _ in 0..3 {
            timer.decay(Duration::from_millis(50));
            assert!(!timer.is_elapsed());
        }
        timer.decay(Duration::from_millis(50));
        assert!(timer.is_elapsed());
    }

    #[test]
    fn test_default_is_elapsed() {
        assert!(Countdown::default().is_elapsed());
        assert_eq!(Countdown::default(), Countdown::new(Duration::ZERO));
    }

    #[test]
    fn test_duration_from_secs_rejects_invalid() {
        assert_eq!(duration_from_secs(0.2), Some(Duration::from_millis(200)));
        assert_eq!(duration_from_secs(-1.0), None);
        assert_eq!(duration_from_secs(f64::NAN), None);
        assert_eq!(duration_from_secs(f64::INFINITY), None);
    }
}
