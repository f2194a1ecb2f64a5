use chrono::{NaiveDate, NaiveTime, Timelike};
use shared::error::{AppError, AppResult};

use crate::model::id::UserId;

const FIRST_BOOKABLE_HOUR: u32 = 8;
const LAST_BOOKABLE_HOUR: u32 = 20;

/// A reserved interval of a space on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    occupant_id: Option<UserId>,
    label: Option<String>,
}

impl TimeSlot {
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        occupant_id: Option<UserId>,
        label: Option<String>,
    ) -> AppResult<Self> {
        if start_time >= end_time {
            return Err(AppError::ConversionEntityError(format!(
                "slot on {date} ends ({end_time}) before it starts ({start_time})"
            )));
        }
        Ok(Self {
            date,
            start_time,
            end_time,
            occupant_id,
            label,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn occupant_id(&self) -> Option<UserId> {
        self.occupant_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start_time)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_since_midnight(self.end_time)
    }

    /// Half-open membership: the end minute itself is free.
    pub fn contains(&self, minutes: u32) -> bool {
        self.start_minutes() <= minutes && minutes < self.end_minutes()
    }

    pub fn overlaps(&self, start_minutes: u32, end_minutes: u32) -> bool {
        self.start_minutes() < end_minutes && start_minutes < self.end_minutes()
    }

    pub fn is_held_by(&self, user: UserId) -> bool {
        self.occupant_id == Some(user)
    }

    /// Same date and interval, held by the same occupant. A slot whose
    /// occupant was not reported matches `booking` on the interval alone.
    pub fn is_same_booking(&self, booking: &TimeSlot) -> bool {
        self.date == booking.date
            && self.start_time == booking.start_time
            && self.end_time == booking.end_time
            && self.occupant_id.map_or(true, |id| booking.occupant_id == Some(id))
    }
}

/// Seconds are ignored; slots and pickers work at minute resolution.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_clock_time(raw: &str) -> AppResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| AppError::ConversionEntityError(format!("invalid time of day: {raw:?}")))
}

pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Times offered by the pickers: every half hour from 08:00 to 20:30.
pub fn time_options() -> Vec<NaiveTime> {
    (FIRST_BOOKABLE_HOUR..=LAST_BOOKABLE_HOUR)
        .flat_map(|hour| [0, 30].map(|minute| (hour, minute)))
        .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
        .collect()
}
