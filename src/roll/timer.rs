//! Roll timer: A repeating timer polled from the owning thread's frame loop.
//!
//! Pausing parks the fire date in the far future; resuming pulls it into the
//! past so the next poll fires at once. Fires the consumer was too slow to
//! observe are skipped, never replayed.

use std::time::{Duration, Instant};

/// When the timer will fire next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireDate {
    /// Fires on the next poll.
    DistantPast,
    /// Fires once this instant has passed.
    At(Instant),
    /// Parked; never fires until rescheduled.
    DistantFuture,
}

/// Repeating timer with a fixed interval.
#[derive(Debug, Clone)]
pub struct RollTimer {
    interval: Duration,
    fire_date: FireDate,
}

impl RollTimer {
    /// Create a timer whose first fire is one interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            fire_date: FireDate::At(now + interval),
        }
    }

    /// Get the repeat interval.
    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Get the next fire date.
    #[inline]
    pub const fn fire_date(&self) -> FireDate {
        self.fire_date
    }

    /// Check whether the timer is parked.
    #[inline]
    pub const fn is_parked(&self) -> bool {
        matches!(self.fire_date, FireDate::DistantFuture)
    }

    /// Park the timer so it never fires.
    pub const fn park(&mut self) {
        self.fire_date = FireDate::DistantFuture;
    }

    /// Make the next poll fire.
    pub const fn fire_immediately(&mut self) {
        self.fire_date = FireDate::DistantPast;
    }

    /// Check whether the timer is due, rescheduling it if so.
    ///
    /// Returns `true` at most once per call regardless of how many intervals
    /// elapsed since the last poll.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.fire_date {
            FireDate::DistantFuture => false,
            FireDate::DistantPast => {
                self.fire_date = FireDate::At(now + self.interval);
                true
            }
            FireDate::At(due) if now >= due => {
                let mut next = due + self.interval;
                // Behind schedule: catch up without a burst of fires
                if next <= now {
                    next = now + self.interval;
                }
                self.fire_date = FireDate::At(next);
                true
            }
            FireDate::At(_) => false,
        }
    }
}
