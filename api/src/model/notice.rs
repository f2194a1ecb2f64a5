use shared::error::AppError;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A message for the user. Every error that reaches the presentation layer
/// ends up as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// The session is gone; the user has to sign in again.
    pub requires_login: bool,
}

impl Notice {
    fn new(severity: Severity, summary: &str, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
            requires_login: false,
        }
    }

    pub fn success(summary: &str, detail: impl Into<String>) -> Self {
        Self::new(Severity::Success, summary, detail)
    }

    pub fn info(summary: &str, detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, summary, detail)
    }

    pub fn warning(summary: &str, detail: impl Into<String>) -> Self {
        Self::new(Severity::Warning, summary, detail)
    }

    pub fn error(summary: &str, detail: impl Into<String>) -> Self {
        Self::new(Severity::Error, summary, detail)
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        let notice = match err {
            AppError::InvalidInput(_) | AppError::ValidationError(_) => {
                Notice::warning("Check the form", err.to_string())
            }
            AppError::SlotConflict { .. } => Notice::warning("Not available", err.to_string()),
            AppError::AvailabilityUnknown(_) => Notice::error(
                "Availability unknown",
                format!("{err}. Try again before booking."),
            ),
            AppError::UnauthenticatedError => {
                Notice::warning("Sign in required", "Sign in to make a reservation.")
            }
            AppError::UnauthorizedError => Notice::error(
                "Session expired",
                "Your session has expired. Sign in again.",
            ),
            AppError::ForbiddenOperation => Notice::error(
                "Access denied",
                "You do not have permission for this operation.",
            ),
            AppError::EntityNotFound(_) => Notice::error("Not found", err.to_string()),
            AppError::UnprocessableEntity(_) => Notice::error("Request rejected", err.to_string()),
            AppError::TooManyRequests => Notice::warning(
                "Too many requests",
                "Too many requests. Wait a moment and try again.",
            ),
            AppError::ServerError(_) => Notice::error(
                "Server error",
                "The server ran into a problem. Try again later.",
            ),
            AppError::TransportError(_) => Notice::error(
                "Connection problem",
                "The server could not be reached. Check your connection.",
            ),
            AppError::PartialBooking {
                created,
                failed_on,
                source,
            } => {
                let days = created
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Notice::warning(
                    "Booking incomplete",
                    format!(
                        "Reserved {days}, but {failed_on} failed: {source}. The reserved days were kept."
                    ),
                )
            }
            AppError::UnexpectedStatus { .. }
            | AppError::ConversionEntityError(_)
            | AppError::SessionStoreError(_) => Notice::error("Something went wrong", err.to_string()),
        };
        Notice {
            requires_login: err.requires_login(),
            ..notice
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::UnauthorizedError, true)]
    #[case(AppError::UnauthenticatedError, true)]
    #[case(AppError::ForbiddenOperation, false)]
    #[case(AppError::ServerError(502), false)]
    fn login_flag_follows_the_error(#[case] err: AppError, #[case] expected: bool) {
        assert_eq!(Notice::from(&err).requires_login, expected);
    }

    #[test]
    fn validation_problems_are_warnings() {
        let notice = Notice::from(&AppError::InvalidInput(
            "the end time must be after the start time".into(),
        ));
        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(notice.detail, "the end time must be after the start time");
    }

    #[test]
    fn partial_booking_lists_kept_days() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
        let notice = Notice::from(&AppError::PartialBooking {
            created: vec![day(10), day(11)],
            failed_on: day(12),
            source: Box::new(AppError::UnprocessableEntity("slot taken".into())),
        });
        assert_eq!(
            notice.detail,
            "Reserved 2026-01-10, 2026-01-11, but 2026-01-12 failed: slot taken. The reserved days were kept."
        );
    }

    #[test]
    fn severity_prints_lowercase() {
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
