use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use rust_decimal::Decimal;

use crate::model::id::{ReservationId, SpaceId};

/// One day of a booking, submitted on its own.
#[derive(Debug, Clone, PartialEq, new)]
pub struct ReservationRequest {
    pub space_id: SpaceId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub price: Decimal,
    pub event_name: String,
    pub event_description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateReservation {
    pub reservation_id: ReservationId,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug)]
pub struct CreateReservationStatus {
    pub name: String,
}
