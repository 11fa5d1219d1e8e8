pub mod store;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A one-shot delay gate for cooperatively scheduled work.
///
/// `arm` starts a countdown, `tick` advances it and reports expiry at most
/// once per arming, and `cancel` drops the pending delivery without firing
/// it. There is no background thread: whoever owns the timer pumps it with
/// elapsed wall time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayTimer {
    delay: Duration,
    elapsed: Duration,
    armed: bool,
}

impl DelayTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = false;
    }

    /// Advance the countdown. Returns true on the tick where the configured
    /// delay has fully elapsed, disarming the timer in the same call.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < self.delay {
            return false;
        }
        self.cancel();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_the_full_delay() {
        let mut timer = DelayTimer::new(Duration::from_secs(1));
        timer.arm();

        assert!(!timer.tick(Duration::from_millis(400)));
        assert!(!timer.tick(Duration::from_millis(400)));
        assert!(timer.tick(Duration::from_millis(400)));
    }

    #[test]
    fn fires_at_most_once_per_arming() {
        let mut timer = DelayTimer::new(Duration::from_millis(100));
        timer.arm();

        assert!(timer.tick(Duration::from_millis(150)));
        assert!(!timer.tick(Duration::from_millis(150)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancel_prevents_the_pending_delivery() {
        let mut timer = DelayTimer::new(Duration::from_millis(100));
        timer.arm();
        timer.cancel();

        assert!(!timer.tick(Duration::from_secs(10)));
    }

    #[test]
    fn ticking_a_disarmed_timer_is_inert() {
        let mut timer = DelayTimer::new(Duration::from_millis(100));
        assert!(!timer.tick(Duration::from_secs(10)));
    }

    #[test]
    fn rearming_restarts_the_countdown() {
        let mut timer = DelayTimer::new(Duration::from_millis(100));
        timer.arm();
        assert!(!timer.tick(Duration::from_millis(80)));

        timer.arm();
        assert!(!timer.tick(Duration::from_millis(80)));
        assert!(timer.tick(Duration::from_millis(20)));
    }
}
