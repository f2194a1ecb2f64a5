use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::SpaceId,
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        Space, SpaceListOptions,
    },
};
use kernel::repository::space::SpaceRepository;
use shared::error::{AppError, AppResult};

use crate::http::{
    model::space::{list_query, CreateSpaceBody, SpaceRow, UpdateSpaceBody},
    ApiClient,
};

const ADMIN_SPACES: &str = "/api/v1/admin/spaces";

#[derive(new)]
pub struct SpaceRepositoryImpl {
    client: ApiClient,
}

#[async_trait]
impl SpaceRepository for SpaceRepositoryImpl {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self, options: SpaceListOptions) -> AppResult<Vec<Space>> {
        let rows: Vec<SpaceRow> = self
            .client
            .get_list("/api/spaces", &list_query(&options))
            .await?;

        Ok(rows.into_iter().map(Space::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        match self
            .client
            .get_data::<SpaceRow>(&format!("/api/spaces/{space_id}"), &[])
            .await
        {
            Ok(row) => Ok(Some(row.into())),
            Err(AppError::EntityNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, event: CreateSpace) -> AppResult<Space> {
        self.client
            .post_data::<_, SpaceRow>(ADMIN_SPACES, &CreateSpaceBody::from(event))
            .await
            .map(Space::from)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, event: UpdateSpace) -> AppResult<Space> {
        let path = format!("{ADMIN_SPACES}/{}", event.space_id);
        self.client
            .put_data::<_, SpaceRow>(&path, &UpdateSpaceBody::from(event))
            .await
            .map(Space::from)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, event: DeleteSpace) -> AppResult<()> {
        self.client
            .delete(&format!("{ADMIN_SPACES}/{}", event.space_id))
            .await
    }
}
