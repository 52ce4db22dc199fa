//! Time source for note ids and creation dates.
use std::cell::Cell;

use chrono::{DateTime, Duration, FixedOffset, Local};

pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock that returns a set instant, advancing by `step` after each reading
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<DateTime<FixedOffset>>,
    step: Duration,
}

impl ManualClock {
    /// A clock frozen at `start`.
    pub fn fixed(start: DateTime<FixedOffset>) -> Self {
        Self::stepping(start, Duration::zero())
    }

    pub fn stepping(start: DateTime<FixedOffset>, step: Duration) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }

    /// A frozen clock at the given epoch milliseconds, in UTC.
    pub fn at_millis(millis: i64) -> Self {
        let start = DateTime::from_timestamp_millis(millis).unwrap_or_default();
        Self::fixed(start.fixed_offset())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}
