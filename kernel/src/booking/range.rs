use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

use crate::model::{
    id::SpaceId,
    reservation::event::ReservationRequest,
    selection::Selection,
    slot::minutes_since_midnight,
};

/// Calendar days from `start` to `end`, both included. Without an end the
/// booking covers `start` alone.
pub fn booking_days(start: NaiveDate, end: Option<NaiveDate>) -> Vec<NaiveDate> {
    let end = end.unwrap_or(start);
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .collect()
}

/// Expands a selection into one request per day. Every request carries the
/// same hours and the same per-day price.
pub fn build_requests(
    space_id: SpaceId,
    selection: &Selection,
    per_day_price: Decimal,
    event_name: &str,
    event_description: Option<&str>,
) -> AppResult<Vec<ReservationRequest>> {
    let (Some(start_date), Some(start_time), Some(end_time)) = (
        selection.start_date(),
        selection.start_time(),
        selection.end_time(),
    ) else {
        return Err(AppError::InvalidInput(
            "choose a date, a start time and an end time".into(),
        ));
    };
    if minutes_since_midnight(end_time) <= minutes_since_midnight(start_time) {
        return Err(AppError::InvalidInput(
            "the end time must be after the start time".into(),
        ));
    }

    Ok(booking_days(start_date, selection.end_date())
        .into_iter()
        .map(|date| {
            ReservationRequest::new(
                space_id,
                date,
                start_time,
                end_time,
                per_day_price,
                event_name.to_string(),
                event_description.map(str::to_string),
            )
        })
        .collect())
}
