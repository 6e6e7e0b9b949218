//! Configuration for a notice view.

use crate::error::{Error, Result};
use std::time::Duration;

/// Timing configuration for a [`NoticeView`](crate::NoticeView).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeConfig {
    /// How long each notice stays fully visible before the next roll.
    pub stay_interval: Duration,
    /// How long a single slide transition takes.
    pub transition_duration: Duration,
}

impl NoticeConfig {
    /// Default time between rolls.
    pub const DEFAULT_STAY_INTERVAL: Duration = Duration::from_secs(2);
    /// Default slide duration.
    pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

    /// Set the stay interval.
    #[must_use]
    pub const fn with_stay_interval(mut self, stay_interval: Duration) -> Self {
        self.stay_interval = stay_interval;
        self
    }

    /// Set the transition duration.
    #[must_use]
    pub const fn with_transition_duration(mut self, transition_duration: Duration) -> Self {
        self.transition_duration = transition_duration;
        self
    }

    /// Check the timing values.
    ///
    /// A stay interval shorter than the transition is allowed, but ticks that
    /// land mid-slide are dropped, so the ticker will skip cycles.
    pub fn validate(&self) -> Result<()> {
        if self.stay_interval.is_zero() {
            return Err(Error::ZeroStayInterval);
        }
        if self.transition_duration.is_zero() {
            return Err(Error::ZeroTransition);
        }
        if self.transition_duration > self.stay_interval {
            tracing::warn!(
                stay = ?self.stay_interval,
                transition = ?self.transition_duration,
                "stay interval shorter than the transition; rolls will skip cycles"
            );
        }
        Ok(())
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            stay_interval: Self::DEFAULT_STAY_INTERVAL,
            transition_duration: Self::DEFAULT_TRANSITION,
        }
    }
}
