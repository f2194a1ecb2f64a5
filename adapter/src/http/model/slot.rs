use chrono::NaiveDate;
use kernel::model::{
    availability::AvailabilityQuery,
    id::UserId,
    slot::{parse_clock_time, TimeSlot},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct AvailabilitySlotRow {
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub reserved_by: Option<String>,
    #[serde(default)]
    pub user_uuid: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
}

impl TryFrom<AvailabilitySlotRow> for TimeSlot {
    type Error = AppError;

    fn try_from(value: AvailabilitySlotRow) -> AppResult<Self> {
        let AvailabilitySlotRow {
            event_date,
            start_time,
            end_time,
            reserved_by,
            user_uuid,
            event_name,
        } = value;
        // An occupant that is not a user id is somebody else; the slot
        // still blocks.
        let occupant = user_uuid
            .or(reserved_by)
            .and_then(|raw| raw.parse::<UserId>().ok());
        TimeSlot::new(
            event_date,
            parse_clock_time(&start_time)?,
            parse_clock_time(&end_time)?,
            occupant,
            event_name,
        )
    }
}

pub fn availability_query(query: &AvailabilityQuery) -> [(&'static str, String); 2] {
    [
        ("start_date", query.start_date.format("%Y-%m-%d").to_string()),
        ("end_date", query.end_date.format("%Y-%m-%d").to_string()),
    ]
}
