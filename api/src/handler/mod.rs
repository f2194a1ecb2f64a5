use kernel::model::user::User;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub mod admin;
pub mod auth;
pub mod reservation;
pub mod space;

/// The signed-in user, fetching the profile once if the session only holds
/// a token.
pub(crate) async fn signed_in_user(registry: &AppRegistry) -> AppResult<User> {
    let session = registry.session();
    if !session.is_authenticated().await {
        return Err(AppError::UnauthenticatedError);
    }
    if let Some(user) = session.current_user().await {
        return Ok(user);
    }
    let user = registry.auth_repository().fetch_current_user().await?;
    session.set_user(user.clone()).await?;
    Ok(user)
}

/// A failed availability fetch means "cannot confirm", except when the
/// session itself died.
pub(crate) fn unknown_unless_login(e: AppError) -> AppError {
    if e.requires_login() {
        e
    } else {
        AppError::AvailabilityUnknown(e.to_string())
    }
}

#[cfg(test)]
pub(crate) mod fake;
