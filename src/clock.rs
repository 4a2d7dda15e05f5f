use std::time::{Duration, Instant};

/// A due timer reported by [`SimulationClock::poll`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ClockFire {
    /// The repeating tick timer fired.
    Tick,
    /// The one-shot alarm fired.
    Alarm,
}

#[derive(Debug, Clone, Copy)]
struct TickTimer {
    deadline: Instant,
    interval: Duration,
}

/// Deadline-based timers for the cooperative game loop.
///
/// Holds at most one repeating tick timer and one one-shot alarm; arming
/// either replaces the previous one, so two timers of the same kind are
/// never live at once. Time is passed in explicitly, which lets tests drive
/// the clock without sleeping.
#[derive(Debug, Default)]
pub struct SimulationClock {
    tick: Option<TickTimer>,
    alarm: Option<Instant>,
}

impl SimulationClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the repeating tick timer at `interval`, replacing any
    /// existing one. The first fire is due one full interval from `now`.
    pub fn arm(&mut self, now: Instant, interval: Duration) {
        self.tick = Some(TickTimer {
            deadline: now + interval,
            interval,
        });
    }

    /// Installs the one-shot alarm `delay` from `now`, replacing any
    /// existing alarm.
    pub fn arm_alarm(&mut self, now: Instant, delay: Duration) {
        self.alarm = Some(now + delay);
    }

    /// Cancels the repeating tick timer.
    pub fn cancel_tick(&mut self) {
        self.tick = None;
    }

    /// Cancels the one-shot alarm.
    pub fn cancel_alarm(&mut self) {
        self.alarm = None;
    }

    /// Cancels both timers. Idempotent.
    pub fn stop(&mut self) {
        self.tick = None;
        self.alarm = None;
    }

    /// Returns true while the tick timer is armed.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.tick.is_some()
    }

    /// Returns the armed tick interval, if any.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick.map(|timer| timer.interval)
    }

    /// Reports at most one due timer, alarm before tick.
    ///
    /// A fired tick re-arms at `now + interval` rather than advancing from
    /// the old deadline, so a stalled loop resumes at the nominal rate
    /// instead of firing a burst of catch-up ticks. One fire per poll keeps
    /// exactly one simulation step in flight.
    pub fn poll(&mut self, now: Instant) -> Option<ClockFire> {
        if let Some(deadline) = self.alarm {
            if now >= deadline {
                self.alarm = None;
                return Some(ClockFire::Alarm);
            }
        }

        if let Some(timer) = &mut self.tick {
            if now >= timer.deadline {
                timer.deadline = now + timer.interval;
                return Some(ClockFire::Tick);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{ClockFire, SimulationClock};

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn tick_fires_once_per_interval() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new();
        clock.arm(t0, MS_100);

        assert_eq!(clock.poll(t0), None);
        assert_eq!(clock.poll(t0 + MS_100), Some(ClockFire::Tick));
        // Re-armed from the fire time, not due again immediately.
        assert_eq!(clock.poll(t0 + MS_100), None);
        assert_eq!(clock.poll(t0 + MS_200), Some(ClockFire::Tick));
    }

    #[test]
    fn arming_replaces_the_previous_tick_timer() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new();
        clock.arm(t0, MS_100);
        clock.arm(t0, MS_200);

        // The old 100ms deadline is gone.
        assert_eq!(clock.poll(t0 + MS_100), None);
        assert_eq!(clock.poll(t0 + MS_200), Some(ClockFire::Tick));
        assert_eq!(clock.tick_interval(), Some(MS_200));
    }

    #[test]
    fn alarm_fires_once_and_before_tick() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new();
        clock.arm(t0, MS_100);
        clock.arm_alarm(t0, MS_100);

        let due = t0 + MS_100;
        assert_eq!(clock.poll(due), Some(ClockFire::Alarm));
        assert_eq!(clock.poll(due), Some(ClockFire::Tick));
        assert_eq!(clock.poll(due), None);
    }

    #[test]
    fn arming_alarm_replaces_the_previous_alarm() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new();
        clock.arm_alarm(t0, MS_100);
        clock.arm_alarm(t0, MS_200);

        assert_eq!(clock.poll(t0 + MS_100), None);
        assert_eq!(clock.poll(t0 + MS_200), Some(ClockFire::Alarm));
    }

    #[test]
    fn stop_cancels_everything_and_is_idempotent() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new();
        clock.arm(t0, MS_100);
        clock.arm_alarm(t0, MS_100);

        clock.stop();
        clock.stop();

        assert!(!clock.is_ticking());
        assert_eq!(clock.poll(t0 + MS_200), None);
    }
}
