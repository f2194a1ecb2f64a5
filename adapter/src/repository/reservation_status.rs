use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ReservationStatusId,
    reservation::{event::CreateReservationStatus, ReservationStatus},
};
use kernel::repository::reservation_status::ReservationStatusRepository;
use shared::error::AppResult;

use crate::http::{
    model::pricing::{CreateStatusBody, StatusRow},
    ApiClient,
};

const STATUSES: &str = "/api/v1/admin/reservation-statuses";

#[derive(new)]
pub struct ReservationStatusRepositoryImpl {
    client: ApiClient,
}

#[async_trait]
impl ReservationStatusRepository for ReservationStatusRepositoryImpl {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> AppResult<Vec<ReservationStatus>> {
        let rows: Vec<StatusRow> = self.client.get_list(STATUSES, &[]).await?;
        Ok(rows.into_iter().map(ReservationStatus::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, event: CreateReservationStatus) -> AppResult<ReservationStatus> {
        self.client
            .post_data::<_, StatusRow>(STATUSES, &CreateStatusBody { name: event.name })
            .await
            .map(ReservationStatus::from)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, status_id: ReservationStatusId) -> AppResult<()> {
        self.client.delete(&format!("{STATUSES}/{status_id}")).await
    }
}
