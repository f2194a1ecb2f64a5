use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{availability::AvailabilityQuery, slot::TimeSlot};

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Occupied slots of the queried space and range. A failure is reported
    /// as an error; it never degrades into an empty list.
    async fn find_slots(&self, query: &AvailabilityQuery) -> AppResult<Vec<TimeSlot>>;
}
