use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::SpaceId,
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        Space, SpaceListOptions,
    },
};

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn find_all(&self, options: SpaceListOptions) -> AppResult<Vec<Space>>;
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>>;
    // admin only
    async fn create(&self, event: CreateSpace) -> AppResult<Space>;
    async fn update(&self, event: UpdateSpace) -> AppResult<Space>;
    async fn delete(&self, event: DeleteSpace) -> AppResult<()>;
}
