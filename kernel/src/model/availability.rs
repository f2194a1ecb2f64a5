use chrono::{Datelike, Months, NaiveDate};
use shared::error::{AppError, AppResult};

use crate::model::{id::SpaceId, slot::TimeSlot};

/// Date range sent to the backend when asking for the occupied slots of a
/// space. The backend rejects past start dates, so the start never lies
/// before today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub space_id: SpaceId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl AvailabilityQuery {
    /// `None` when the whole range is already over.
    pub fn for_range(
        space_id: SpaceId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        today: NaiveDate,
    ) -> Option<Self> {
        let start_date = start_date.max(today);
        (start_date <= end_date).then_some(Self {
            space_id,
            start_date,
            end_date,
        })
    }

    /// Covers the month that contains `day`.
    pub fn for_month(space_id: SpaceId, day: NaiveDate, today: NaiveDate) -> Option<Self> {
        let (first, last) = month_bounds(day)?;
        Self::for_range(space_id, first, last, today)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// First and last day of the month containing `day`.
pub fn month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = day.with_day(1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

/// Occupied slots as last seen by a view. A failed fetch leaves the view in
/// `Unknown`, which is treated as fully booked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    NotLoaded,
    Known(Vec<TimeSlot>),
    Unknown(String),
}

impl Availability {
    pub fn slots(&self) -> AppResult<&[TimeSlot]> {
        match self {
            Availability::Known(slots) => Ok(slots),
            Availability::NotLoaded => Err(AppError::AvailabilityUnknown(
                "availability has not been checked yet".into(),
            )),
            Availability::Unknown(reason) => Err(AppError::AvailabilityUnknown(reason.clone())),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Availability::Known(_))
    }
}
