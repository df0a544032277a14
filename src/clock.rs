use std::time::{Duration, Instant};

pub const DEFAULT_RATE: f32 = 60.0;

/// Throttles generation steps to a target rate. The clock never schedules
/// anything itself; the frame loop asks `due` with its own notion of now,
/// which keeps the generator free of timing dependencies in tests.
pub struct StepClock {
    interval: Duration,
    last_step: Option<Instant>,
}

impl StepClock {
    pub fn new() -> Self {
        Self::with_rate(DEFAULT_RATE)
    }

    pub fn with_rate(steps_per_second: f32) -> Self {
        let mut clock = Self {
            interval: Duration::from_millis(0),
            last_step: None,
        };
        clock.set_rate(steps_per_second);
        clock
    }

    pub fn set_rate(&mut self, steps_per_second: f32) {
        // a zero rate would stall the interval math
        let rate = steps_per_second.max(1.0);
        self.interval = Duration::from_millis((1000.0 / rate) as u64);
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.last_step {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last_step = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_step = None;
    }
}

#[cfg(test)]
mod test_clock {
    use super::*;

    #[test]
    fn first_tick_is_due() {
        let mut clock = StepClock::with_rate(10.0);
        assert!(clock.due(Instant::now()));
    }

    #[test]
    fn ticks_are_throttled_to_the_interval() {
        let mut clock = StepClock::with_rate(10.0);
        let t0 = Instant::now();

        assert!(clock.due(t0));
        assert!(!clock.due(t0 + Duration::from_millis(50)));
        assert!(!clock.due(t0 + Duration::from_millis(99)));
        assert!(clock.due(t0 + Duration::from_millis(100)));
        // the interval restarts from the accepted tick
        assert!(!clock.due(t0 + Duration::from_millis(199)));
        assert!(clock.due(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn rate_can_change_mid_run() {
        let mut clock = StepClock::with_rate(10.0);
        let t0 = Instant::now();

        assert!(clock.due(t0));
        clock.set_rate(1000.0);
        assert!(clock.due(t0 + Duration::from_millis(1)));
    }

    #[test]
    fn zero_rate_is_clamped() {
        let mut clock = StepClock::with_rate(0.0);
        let t0 = Instant::now();

        assert!(clock.due(t0));
        assert!(!clock.due(t0 + Duration::from_millis(999)));
        assert!(clock.due(t0 + Duration::from_millis(1000)));
    }

    #[test]
    fn reset_forgets_the_last_tick() {
        let mut clock = StepClock::with_rate(10.0);
        let t0 = Instant::now();

        assert!(clock.due(t0));
        clock.reset();
        assert!(clock.due(t0 + Duration::from_millis(1)));
    }
}
