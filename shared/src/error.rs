use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("availability could not be confirmed: {0}")]
    AvailabilityUnknown(String),
    #[error("{date} {start}-{end} is already reserved")]
    SlotConflict {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("too many requests")]
    TooManyRequests,
    #[error("server error ({0})")]
    ServerError(u16),
    #[error("unexpected response status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
    #[error("request failed")]
    TransportError(#[from] reqwest::Error),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("booking stopped on {failed_on} after {} day(s) were created", created.len())]
    PartialBooking {
        created: Vec<NaiveDate>,
        failed_on: NaiveDate,
        #[source]
        source: Box<AppError>,
    },
    #[error("sign in required")]
    UnauthenticatedError,
    #[error("session expired or credentials rejected")]
    UnauthorizedError,
    #[error("operation not permitted")]
    ForbiddenOperation,
    #[error("session store: {0}")]
    SessionStoreError(String),
}

impl AppError {
    /// Errors caught before anything was sent to the backend.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_) | AppError::ValidationError(_) | AppError::SlotConflict { .. }
        )
    }

    /// The session is no longer usable and the user must sign in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AppError::UnauthenticatedError | AppError::UnauthorizedError
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::InvalidInput("x".into()), true)]
    #[case(AppError::AvailabilityUnknown("down".into()), false)]
    #[case(AppError::ServerError(500), false)]
    fn validation_errors_are_classified(#[case] err: AppError, #[case] expected: bool) {
        assert_eq!(err.is_validation(), expected);
    }

    #[test]
    fn partial_booking_reports_progress() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
        let err = AppError::PartialBooking {
            created: vec![day(10), day(11)],
            failed_on: day(12),
            source: Box::new(AppError::UnprocessableEntity("taken".into())),
        };
        assert_eq!(
            err.to_string(),
            "booking stopped on 2026-01-12 after 2 day(s) were created"
        );
        assert!(!err.requires_login());
    }
}
