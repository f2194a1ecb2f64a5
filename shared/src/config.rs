use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use rust_decimal::Decimal;

const DEFAULT_API_URL: &str = "https://api.reservas.app";
const SESSION_DIR_NAME: &str = ".reservation-desk";

pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    /// Missing keys fall back to the defaults of the reference deployment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = ApiConfig {
            base_url: lookup("API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.into())
                .trim_end_matches('/')
                .to_string(),
        };

        let session = SessionConfig {
            dir: match lookup("SESSION_DIR") {
                Some(dir) => PathBuf::from(dir),
                None => lookup("HOME")
                    .map(|home| PathBuf::from(home).join(SESSION_DIR_NAME))
                    .unwrap_or_else(|| PathBuf::from(SESSION_DIR_NAME)),
            },
        };

        let booking = BookingConfig {
            service_fee: parse_or(&lookup, "SERVICE_FEE", Decimal::new(15, 0))?,
            default_hourly_rate: parse_or(&lookup, "DEFAULT_HOURLY_RATE", Decimal::new(50, 0))?,
            change_lead_hours: parse_or(&lookup, "CHANGE_LEAD_HOURS", 1)?,
        };

        Ok(Self {
            api,
            session,
            booking,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
    }
}

pub struct ApiConfig {
    pub base_url: String,
}

pub struct SessionConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Flat surcharge added once per booking.
    pub service_fee: Decimal,
    /// Rate used when a space carries no pricing rule.
    pub default_hourly_rate: Decimal,
    /// Minimum number of hours before the start of a reservation for it to
    /// be edited or cancelled.
    pub change_lead_hours: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            service_fee: Decimal::new(15, 0),
            default_hourly_rate: Decimal::new(50, 0),
            change_lead_hours: 1,
        }
    }
}
