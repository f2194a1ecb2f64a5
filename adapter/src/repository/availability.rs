use async_trait::async_trait;
use derive_new::new;
use kernel::model::{availability::AvailabilityQuery, slot::TimeSlot};
use kernel::repository::availability::AvailabilityRepository;
use shared::error::AppResult;

use crate::http::{
    model::slot::{availability_query, AvailabilitySlotRow},
    ApiClient,
};

#[derive(new)]
pub struct AvailabilityRepositoryImpl {
    client: ApiClient,
}

#[async_trait]
impl AvailabilityRepository for AvailabilityRepositoryImpl {
    #[tracing::instrument(skip(self))]
    async fn find_slots(&self, query: &AvailabilityQuery) -> AppResult<Vec<TimeSlot>> {
        let rows: Vec<AvailabilitySlotRow> = self
            .client
            .get_list(
                &format!("/api/spaces/{}/availability", query.space_id),
                &availability_query(query),
            )
            .await?;

        let slots = rows
            .into_iter()
            .map(TimeSlot::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        tracing::debug!(count = slots.len(), "occupied slots");
        Ok(slots)
    }
}
