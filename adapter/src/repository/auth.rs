use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    session::Session,
    user::{
        event::{
            ActivateAccount, ChangePassword, Credentials, RegisterUser, ResetPassword,
            UpdateProfile,
        },
        User,
    },
};
use kernel::repository::auth::AuthRepository;
use shared::error::AppResult;

use crate::http::{
    model::user::{
        ActivateBody, ChangePasswordBody, EmailAvailability, EmailBody, LoginBody, LoginPayload,
        ProfileBody, RegisterBody, ResetPasswordBody, UserPayload,
    },
    ApiClient,
};

#[derive(new)]
pub struct AuthRepositoryImpl {
    client: ApiClient,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    #[tracing::instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: Credentials) -> AppResult<Session> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };
        let payload: LoginPayload = self.client.post("/api/auth/login", Some(&body)).await?;
        Ok(payload.into())
    }

    #[tracing::instrument(skip_all)]
    async fn logout(&self) -> AppResult<()> {
        self.client.post_empty("/api/auth/logout").await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_current_user(&self) -> AppResult<User> {
        let payload: UserPayload = self.client.get("/api/user", &[]).await?;
        Ok(payload.into())
    }

    #[tracing::instrument(skip_all)]
    async fn register(&self, event: RegisterUser) -> AppResult<User> {
        let payload: UserPayload = self
            .client
            .post("/api/auth/register", Some(&RegisterBody::from(event)))
            .await?;
        Ok(payload.into())
    }

    #[tracing::instrument(skip_all)]
    async fn activate_account(&self, event: ActivateAccount) -> AppResult<()> {
        self.client
            .post_discard("/api/auth/activate", &ActivateBody::from(event))
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn change_password(&self, event: ChangePassword) -> AppResult<()> {
        self.client
            .post_discard("/api/auth/change-password", &ChangePasswordBody::from(event))
            .await
    }

    #[tracing::instrument(skip_all, fields(email = %email))]
    async fn forgot_password(&self, email: String) -> AppResult<()> {
        self.client
            .post_discard("/api/auth/forgot-password", &EmailBody { email: &email })
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn reset_password(&self, event: ResetPassword) -> AppResult<()> {
        self.client
            .post_discard("/api/auth/reset-password", &ResetPasswordBody::from(event))
            .await
    }

    #[tracing::instrument(skip_all)]
    async fn update_profile(&self, event: UpdateProfile) -> AppResult<User> {
        let payload: UserPayload = self
            .client
            .put("/api/user/profile", &ProfileBody::from(event))
            .await?;
        Ok(payload.into())
    }

    #[tracing::instrument(skip_all, fields(email = %email))]
    async fn check_email(&self, email: String) -> AppResult<bool> {
        let answer: EmailAvailability = self
            .client
            .post("/api/auth/check-email", Some(&EmailBody { email: &email }))
            .await?;
        Ok(answer.is_available())
    }
}
