use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::ReservationId,
    reservation::{
        event::{ReservationRequest, UpdateReservation},
        Reservation,
    },
};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // reservations of the signed-in user, optionally narrowed to one status
    async fn find_mine(&self, status: Option<String>) -> AppResult<Vec<Reservation>>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation>;
    async fn create(&self, request: ReservationRequest) -> AppResult<Reservation>;
    async fn update(&self, event: UpdateReservation) -> AppResult<Reservation>;
    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<Reservation>;
    // every reservation, admin only
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;
}
