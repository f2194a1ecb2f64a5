use chrono::{NaiveDate, NaiveTime};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::ReservationId,
    reservation::{event::UpdateReservation, Reservation},
};
use rust_decimal::Decimal;

#[derive(Debug, Validate)]
pub struct ReservationEditForm {
    #[garde(length(min = 1, max = 255))]
    pub event_name: String,
    #[garde(skip)]
    pub event_date: NaiveDate,
    #[garde(skip)]
    pub start_time: NaiveTime,
    #[garde(skip)]
    pub end_time: NaiveTime,
}

impl ReservationEditForm {
    /// Prefilled with the current values of `reservation`.
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            event_name: reservation.event_name.clone(),
            event_date: reservation.event_date,
            start_time: reservation.start_time,
            end_time: reservation.end_time,
        }
    }
}

#[derive(new)]
pub struct ReservationEditFormWithId(ReservationId, ReservationEditForm);

impl From<ReservationEditFormWithId> for UpdateReservation {
    fn from(value: ReservationEditFormWithId) -> Self {
        let ReservationEditFormWithId(
            reservation_id,
            ReservationEditForm {
                event_name,
                event_date,
                start_time,
                end_time,
            },
        ) = value;
        UpdateReservation {
            reservation_id,
            event_name,
            event_date,
            start_time,
            end_time,
        }
    }
}

/// What a successful booking produced.
#[derive(Debug)]
pub struct BookingConfirmation {
    pub reservations: Vec<Reservation>,
    pub total: Decimal,
}
