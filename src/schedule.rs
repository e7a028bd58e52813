use std::time::{Duration, Instant};

/// Fixed-interval tick pacing for a host loop.
///
/// The schedule never fires more than `max_catch_up` ticks per poll. If the
/// host stalled for longer than that, the missed ticks are dropped and the
/// schedule resynchronizes to the current instant.
#[derive(Clone, Debug)]
pub struct TickSchedule {
    interval: Duration,
    next_due: Instant,
    max_catch_up: u32,
    ticks: u64,
}

impl TickSchedule {
    /// First tick is due one interval after `start`.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next_due: start + interval,
            max_catch_up: 4,
            ticks: 0,
        }
    }

    pub fn with_max_catch_up(mut self, max: u32) -> Self {
        self.max_catch_up = max.max(1);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks fired so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of ticks due at `now`. Consumes them.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while now >= self.next_due {
            if due == self.max_catch_up {
                tracing::debug!(
                    dropped_after = due,
                    "tick schedule fell behind, resynchronizing"
                );
                self.next_due = now + self.interval;
                break;
            }
            due += 1;
            self.next_due += self.interval;
        }
        self.ticks += u64::from(due);
        due
    }

    /// How long the host may sleep before the next tick.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
