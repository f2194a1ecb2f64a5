use kernel::model::{
    session::{Session, TokenState},
    user::User,
};
use shared::error::AppResult;
use tokio::sync::RwLock;

pub mod store;

use store::FileSessionStore;

/// The signed-in identity, shared by the HTTP client and the views.
/// Created once at startup and handed around explicitly.
pub struct SessionContext {
    current: RwLock<Option<Session>>,
    store: Option<FileSessionStore>,
}

impl SessionContext {
    /// A context that forgets everything when the process ends.
    pub fn in_memory(session: Option<Session>) -> Self {
        Self {
            current: RwLock::new(session),
            store: None,
        }
    }

    /// Reloads the persisted session. A token that cannot be decoded or has
    /// expired at `now` (unix seconds) is discarded, along with the file.
    pub async fn restore(store: FileSessionStore, now: i64) -> AppResult<Self> {
        let session = match store.load().await? {
            None => None,
            Some(stored) => {
                let session = stored.into_session();
                match session.token_state(now) {
                    TokenState::Valid => Some(session),
                    state => {
                        tracing::info!(?state, "discarding stored session");
                        store.remove().await?;
                        None
                    }
                }
            }
        };
        Ok(Self {
            current: RwLock::new(session),
            store: Some(store),
        })
    }

    pub async fn establish(&self, session: Session) -> AppResult<()> {
        if let Some(store) = &self.store {
            store.save(&session).await?;
        }
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Attaches the profile to the current session; ignored when signed out.
    pub async fn set_user(&self, user: User) -> AppResult<()> {
        let mut current = self.current.write().await;
        let Some(session) = current.as_mut() else {
            return Ok(());
        };
        session.user = Some(user);
        if let Some(store) = &self.store {
            store.save(session).await?;
        }
        Ok(())
    }

    /// Drops the session. Failing to delete the file is only logged since the
    /// in-memory identity is gone either way.
    pub async fn clear(&self) {
        self.current.write().await.take();
        if let Some(store) = &self.store {
            if let Err(e) = store.remove().await {
                tracing::warn!(error = %e, "could not remove stored session");
            }
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|s| s.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn is_admin(&self) -> bool {
        self.current_user().await.is_some_and(|u| u.is_admin())
    }
}
