pub mod envelope;
pub mod pricing;
pub mod reservation;
pub mod slot;
pub mod space;
pub mod user;

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

// the backend takes times of day as HH:MM
pub(crate) fn serialize_clock_time<S: Serializer>(
    time: &NaiveTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    time.format("%H:%M").to_string().serialize(serializer)
}
