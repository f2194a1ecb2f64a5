use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ReservationId,
    reservation::{
        event::{ReservationRequest, UpdateReservation},
        Reservation,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::AppResult;

use crate::http::{
    model::reservation::{CreateReservationBody, ReservationPayload, UpdateReservationBody},
    ApiClient,
};

const RESERVATIONS: &str = "/api/reservations";

#[derive(new)]
pub struct ReservationRepositoryImpl {
    client: ApiClient,
}

fn into_reservations(payloads: Vec<ReservationPayload>) -> AppResult<Vec<Reservation>> {
    payloads.into_iter().map(Reservation::try_from).collect()
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    #[tracing::instrument(skip(self))]
    async fn find_mine(&self, status: Option<String>) -> AppResult<Vec<Reservation>> {
        let query = [("status", status.unwrap_or_default())];
        let payloads = self.client.get_list(RESERVATIONS, &query).await?;
        into_reservations(payloads)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        self.client
            .get_data::<ReservationPayload>(&format!("{RESERVATIONS}/{reservation_id}"), &[])
            .await
            .and_then(Reservation::try_from)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, request: ReservationRequest) -> AppResult<Reservation> {
        self.client
            .post_data::<_, ReservationPayload>(RESERVATIONS, &CreateReservationBody::from(request))
            .await
            .and_then(Reservation::try_from)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, event: UpdateReservation) -> AppResult<Reservation> {
        let path = format!("{RESERVATIONS}/{}", event.reservation_id);
        self.client
            .put_data::<_, ReservationPayload>(&path, &UpdateReservationBody::from(event))
            .await
            .and_then(Reservation::try_from)
    }

    #[tracing::instrument(skip(self))]
    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        self.client
            .delete_data::<ReservationPayload>(&format!("{RESERVATIONS}/{reservation_id}"))
            .await
            .and_then(Reservation::try_from)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let payloads = self
            .client
            .get_list("/api/v1/admin/reservations", &[])
            .await?;
        into_reservations(payloads)
    }
}
