use garde::Validate;
use kernel::booking::conflict::{exclude_booking, first_conflict, Conflict};
use kernel::model::{
    availability::AvailabilityQuery,
    id::ReservationId,
    reservation::{event::UpdateReservation, Reservation},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::handler::{signed_in_user, unknown_unless_login};
use crate::model::reservation::{ReservationEditForm, ReservationEditFormWithId};

pub struct MyReservationsView {
    registry: AppRegistry,
    reservations: Vec<Reservation>,
}

impl MyReservationsView {
    pub fn new(registry: AppRegistry) -> Self {
        Self {
            registry,
            reservations: Vec::new(),
        }
    }

    /// Loads the signed-in user's reservations, optionally only those in
    /// `status`, soonest first.
    pub async fn load(&mut self, status: Option<String>) -> AppResult<&[Reservation]> {
        signed_in_user(&self.registry).await?;
        let mut reservations = self
            .registry
            .reservation_repository()
            .find_mine(status)
            .await?;
        reservations.sort_by_key(Reservation::starts_at);
        self.reservations = reservations;
        Ok(&self.reservations)
    }

    pub fn can_change(&self, reservation: &Reservation) -> bool {
        reservation.can_change(
            self.registry.clock().now(),
            self.registry.booking().change_lead_hours,
        )
    }
}

pub struct ReservationDetailView {
    registry: AppRegistry,
    reservation: Reservation,
}

impl ReservationDetailView {
    pub async fn open(registry: AppRegistry, reservation_id: ReservationId) -> AppResult<Self> {
        signed_in_user(&registry).await?;
        let reservation = registry
            .reservation_repository()
            .find_by_id(reservation_id)
            .await?;
        Ok(Self {
            registry,
            reservation,
        })
    }

    pub fn reservation(&self) -> &Reservation {
        &self.reservation
    }

    pub fn can_change(&self) -> bool {
        self.reservation.can_change(
            self.registry.clock().now(),
            self.registry.booking().change_lead_hours,
        )
    }

    fn ensure_changeable(&self) -> AppResult<()> {
        if self.can_change() {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "this reservation can no longer be changed (cancelled, or less than {}h before it starts)",
                self.registry.booking().change_lead_hours
            )))
        }
    }

    /// Moves or renames the reservation. The new interval is checked against
    /// every other reservation of the space on that day, the owner's included;
    /// only this reservation's own slot does not count.
    pub async fn save(&mut self, form: ReservationEditForm) -> AppResult<&Reservation> {
        form.validate()?;
        if form.end_time <= form.start_time {
            return Err(AppError::InvalidInput(
                "the end time must be after the start time".into(),
            ));
        }
        self.ensure_changeable()?;

        let now = self.registry.clock().now();
        let query = AvailabilityQuery::for_range(
            self.reservation.space_id,
            form.event_date,
            form.event_date,
            now.date(),
        )
        .ok_or_else(|| AppError::InvalidInput("past dates cannot be selected".into()))?;
        let mut slots = self
            .registry
            .availability_repository()
            .find_slots(&query)
            .await
            .map_err(unknown_unless_login)?;
        exclude_booking(&mut slots, &self.reservation.to_slot()?);

        match first_conflict(form.start_time, form.end_time, &slots, form.event_date, now, None) {
            Conflict::Free => {}
            Conflict::InThePast => {
                return Err(AppError::InvalidInput(
                    "the new start time has already passed".into(),
                ))
            }
            Conflict::Reserved(slot) => {
                return Err(AppError::SlotConflict {
                    date: slot.date(),
                    start: slot.start_time(),
                    end: slot.end_time(),
                })
            }
        }

        let event: UpdateReservation =
            ReservationEditFormWithId::new(self.reservation.id, form).into();
        self.reservation = self
            .registry
            .reservation_repository()
            .update(event)
            .await?;
        tracing::info!(reservation = %self.reservation.id, "reservation updated");
        Ok(&self.reservation)
    }

    pub async fn cancel(&mut self) -> AppResult<&Reservation> {
        self.ensure_changeable()?;
        self.reservation = self
            .registry
            .reservation_repository()
            .cancel(self.reservation.id)
            .await?;
        tracing::info!(reservation = %self.reservation.id, "reservation cancelled");
        Ok(&self.reservation)
    }
}
