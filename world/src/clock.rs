//! One-second countdown driven by explicit tick commands.

/// Result of advancing the countdown by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ClockTick {
    /// The clock is stopped; nothing changed.
    Idle,
    /// One second elapsed and time remains.
    Running { remaining: u32 },
    /// The countdown reached zero and the clock stopped itself.
    Expired,
}

/// Level countdown. Holds no timer of its own; the world advances it once per
/// `Command::Tick`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Clock {
    remaining: u32,
    running: bool,
}

impl Clock {
    /// Arms the countdown with a fresh time limit.
    pub(crate) fn start(&mut self, time_limit: u32) {
        self.remaining = time_limit;
        self.running = true;
    }

    /// Freezes the countdown at its current value.
    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    /// Seconds left on the countdown.
    pub(crate) fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advances the countdown by one second.
    pub(crate) fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            ClockTick::Expired
        } else {
            ClockTick::Running {
                remaining: self.remaining,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_clock_ignores_ticks() {
        let mut clock = Clock::default();
        assert_eq!(clock.tick(), ClockTick::Idle);

        clock.start(5);
        clock.stop();
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert_eq!(clock.remaining(), 5);
    }

    #[test]
    fn countdown_expires_exactly_once() {
        let mut clock = Clock::default();
        clock.start(2);
        assert_eq!(clock.tick(), ClockTick::Running { remaining: 1 });
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn restart_rearms_the_countdown() {
        let mut clock = Clock::default();
        clock.start(1);
        assert_eq!(clock.tick(), ClockTick::Expired);
        clock.start(3);
        assert_eq!(clock.tick(), ClockTick::Running { remaining: 2 });
    }
}
