use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    session::Session,
    user::{
        event::{
            ActivateAccount, ChangePassword, Credentials, RegisterUser, ResetPassword,
            UpdateProfile,
        },
        User,
    },
};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: Credentials) -> AppResult<Session>;
    // best effort; the local session is dropped whatever the backend says
    async fn logout(&self) -> AppResult<()>;
    async fn fetch_current_user(&self) -> AppResult<User>;
    async fn register(&self, event: RegisterUser) -> AppResult<User>;
    async fn activate_account(&self, event: ActivateAccount) -> AppResult<()>;
    async fn change_password(&self, event: ChangePassword) -> AppResult<()>;
    async fn forgot_password(&self, email: String) -> AppResult<()>;
    async fn reset_password(&self, event: ResetPassword) -> AppResult<()>;
    async fn update_profile(&self, event: UpdateProfile) -> AppResult<User>;
    /// `true` when no account uses `email` yet.
    async fn check_email(&self, email: String) -> AppResult<bool>;
}
