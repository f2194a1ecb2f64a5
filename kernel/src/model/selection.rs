use chrono::{NaiveDate, NaiveTime};
use shared::error::{AppError, AppResult};

use crate::booking::range::booking_days;

/// Date part of the booking intent, driven by clicks on a month calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateSelection {
    #[default]
    Empty,
    StartPicked(NaiveDate),
    RangePicked { start: NaiveDate, end: NaiveDate },
}

impl DateSelection {
    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            DateSelection::Empty => None,
            DateSelection::StartPicked(start) | DateSelection::RangePicked { start, .. } => {
                Some(start)
            }
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            DateSelection::RangePicked { end, .. } => Some(end),
            _ => None,
        }
    }

    fn clicked(self, date: NaiveDate) -> Self {
        match self {
            DateSelection::Empty => DateSelection::StartPicked(date),
            DateSelection::StartPicked(start) if date > start => {
                DateSelection::RangePicked { start, end: date }
            }
            DateSelection::StartPicked(start) if date == start => DateSelection::Empty,
            DateSelection::RangePicked { start, .. } if date == start => {
                DateSelection::StartPicked(start)
            }
            // earlier than the current start, or any other day while a range is open
            _ => DateSelection::StartPicked(date),
        }
    }
}

/// Result of typing a date instead of clicking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEntry {
    Accepted,
    ClampedToToday,
}

/// The in-progress booking: a day or day range plus the chosen hours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    dates: DateSelection,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates(&self) -> DateSelection {
        self.dates
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.dates.start()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.dates.end()
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        self.end_time
    }

    pub fn is_empty(&self) -> bool {
        self.dates == DateSelection::Empty
    }

    /// Applies a calendar click. Past days are rejected without changing
    /// anything; clearing the start day also clears the chosen hours.
    pub fn click(&mut self, date: NaiveDate, today: NaiveDate) -> AppResult<()> {
        if date < today {
            return Err(AppError::InvalidInput(
                "past dates cannot be selected".into(),
            ));
        }
        self.dates = self.dates.clicked(date);
        if self.is_empty() {
            self.start_time = None;
            self.end_time = None;
        }
        Ok(())
    }

    /// Manual entry of a single day. A past day is replaced by today.
    /// Any open range is dropped.
    pub fn set_date(&mut self, date: NaiveDate, today: NaiveDate) -> DateEntry {
        if date < today {
            self.dates = DateSelection::StartPicked(today);
            DateEntry::ClampedToToday
        } else {
            self.dates = DateSelection::StartPicked(date);
            DateEntry::Accepted
        }
    }

    pub fn set_times(&mut self, start_time: Option<NaiveTime>, end_time: Option<NaiveTime>) {
        self.start_time = start_time;
        self.end_time = end_time;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Every calendar day covered by the selection, both ends included.
    pub fn days(&self) -> Vec<NaiveDate> {
        match self.dates.start() {
            Some(start) => booking_days(start, self.dates.end()),
            None => Vec::new(),
        }
    }
}
