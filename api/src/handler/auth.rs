use garde::Validate;
use kernel::model::user::{event::UpdateProfile, User};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::handler::signed_in_user;
use crate::model::auth::{
    ActivateAccountForm, ChangePasswordForm, EmailForm, LoginForm, ProfileForm, RegisterForm,
    ResetPasswordForm,
};

pub struct AuthView {
    registry: AppRegistry,
}

impl AuthView {
    pub fn new(registry: AppRegistry) -> Self {
        Self { registry }
    }

    pub async fn login(&self, form: LoginForm) -> AppResult<User> {
        form.validate()?;
        let session = self.registry.auth_repository().login(form.into()).await?;
        let user = session.user.clone();
        self.registry.session().establish(session).await?;

        match user {
            Some(user) => Ok(user),
            // some deployments only hand out the token
            None => signed_in_user(&self.registry).await,
        }
    }

    /// Signs out locally whatever the backend answers.
    pub async fn logout(&self) -> AppResult<()> {
        let session = self.registry.session();
        if !session.is_authenticated().await {
            return Ok(());
        }
        if let Err(e) = self.registry.auth_repository().logout().await {
            tracing::warn!(error = %e, "backend logout failed");
        }
        session.clear().await;
        Ok(())
    }

    pub async fn register(&self, form: RegisterForm) -> AppResult<User> {
        form.validate()?;
        if !form.passwords_match() {
            return Err(AppError::InvalidInput("the passwords do not match".into()));
        }
        self.registry.auth_repository().register(form.into()).await
    }

    pub async fn current_user(&self) -> AppResult<User> {
        signed_in_user(&self.registry).await
    }

    pub async fn activate(&self, form: ActivateAccountForm) -> AppResult<()> {
        form.validate()?;
        self.registry
            .auth_repository()
            .activate_account(form.into())
            .await
    }

    pub async fn change_password(&self, form: ChangePasswordForm) -> AppResult<()> {
        form.validate()?;
        signed_in_user(&self.registry).await?;
        self.registry
            .auth_repository()
            .change_password(form.into())
            .await
    }

    pub async fn forgot_password(&self, form: EmailForm) -> AppResult<()> {
        form.validate()?;
        self.registry
            .auth_repository()
            .forgot_password(form.email)
            .await
    }

    pub async fn reset_password(&self, form: ResetPasswordForm) -> AppResult<()> {
        form.validate()?;
        self.registry
            .auth_repository()
            .reset_password(form.into())
            .await
    }

    /// Sends the changed fields and replaces the cached session user with
    /// the backend's answer.
    pub async fn update_profile(&self, form: ProfileForm) -> AppResult<User> {
        form.validate()?;
        let event: UpdateProfile = form.into();
        if event.is_empty() {
            return Err(AppError::InvalidInput("nothing to update".into()));
        }
        signed_in_user(&self.registry).await?;
        let user = self.registry.auth_repository().update_profile(event).await?;
        self.registry.session().set_user(user.clone()).await?;
        Ok(user)
    }

    /// Whether `email` is still free. A failed check is an error, never a
    /// yes.
    pub async fn check_email(&self, form: EmailForm) -> AppResult<bool> {
        form.validate()?;
        self.registry.auth_repository().check_email(form.email).await
    }
}
