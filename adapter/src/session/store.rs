use std::{io::ErrorKind, path::PathBuf};

use kernel::model::session::Session;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

const SESSION_FILE: &str = "session.json";

/// On-disk form of a session. The user is kept as raw JSON so that a profile
/// written by an older build can be dropped without losing the token.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

impl StoredSession {
    pub fn into_session(self) -> Session {
        let user = self.user.and_then(|raw| match serde_json::from_value(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "dropping unreadable cached user");
                None
            }
        });
        Session {
            token: self.token,
            user,
        }
    }
}

impl TryFrom<&Session> for StoredSession {
    type Error = AppError;

    fn try_from(value: &Session) -> AppResult<Self> {
        let user = value
            .user
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::SessionStoreError(e.to_string()))?;
        Ok(Self {
            token: value.token.clone(),
            user,
        })
    }
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }

    pub async fn load(&self) -> AppResult<Option<StoredSession>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::SessionStoreError(e.to_string())),
        };
        match serde_json::from_slice(&raw) {
            Ok(stored) => Ok(Some(stored)),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    pub async fn save(&self, session: &Session) -> AppResult<()> {
        let stored = StoredSession::try_from(session)?;
        let bytes = serde_json::to_vec_pretty(&stored)
            .map_err(|e| AppError::SessionStoreError(e.to_string()))?;
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AppError::SessionStoreError(e.to_string()))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AppError::SessionStoreError(e.to_string()))
    }

    pub async fn remove(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::SessionStoreError(e.to_string())),
        }
    }
}
