use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::ReservationStatusId,
    reservation::{event::CreateReservationStatus, ReservationStatus},
};

#[async_trait]
pub trait ReservationStatusRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<ReservationStatus>>;
    async fn create(&self, event: CreateReservationStatus) -> AppResult<ReservationStatus>;
    async fn delete(&self, status_id: ReservationStatusId) -> AppResult<()>;
}
