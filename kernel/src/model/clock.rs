use chrono::{Local, NaiveDate, NaiveDateTime, Utc};

/// Source of local wall-clock time for the booking rules.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Unix seconds, for comparing against token expiry.
    fn timestamp(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn timestamp(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock stopped at a given local time, read as UTC for `timestamp`.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }

    fn timestamp(&self) -> i64 {
        self.0.and_utc().timestamp()
    }
}
