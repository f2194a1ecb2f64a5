use chrono::{NaiveDate, NaiveTime};
use kernel::model::{
    id::{PricingRuleId, ReservationId, ReservationStatusId, SpaceId, SpaceTypeId, UserId},
    reservation::{
        event::{ReservationRequest, UpdateReservation},
        Reservation, ReservationSpace, ReservationStatus, ReservationUser,
    },
    slot::parse_clock_time,
};
use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use shared::error::{AppError, AppResult};

use super::{pricing::StatusRow, serialize_clock_time, space::SpaceRow, user::UserRow};

const FLAT_MARKER: &str = "reservation_uuid";

/// The reservations API answers in two shapes: a flat row joined with user
/// and space columns, recognisable by `reservation_uuid`, and a nested
/// document. Both decode into the same `Reservation`.
#[derive(Debug)]
pub enum ReservationPayload {
    Flat(Box<FlatReservationRow>),
    Nested(Box<NestedReservationRow>),
}

impl<'de> Deserialize<'de> for ReservationPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get(FLAT_MARKER).is_some() {
            serde_json::from_value(value)
                .map(|row| ReservationPayload::Flat(Box::new(row)))
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(|row| ReservationPayload::Nested(Box::new(row)))
                .map_err(D::Error::custom)
        }
    }
}

impl TryFrom<ReservationPayload> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationPayload) -> AppResult<Self> {
        let reservation = match value {
            ReservationPayload::Flat(row) => Reservation::try_from(*row)?,
            ReservationPayload::Nested(row) => Reservation::try_from(*row)?,
        };
        if reservation.start_time >= reservation.end_time {
            return Err(AppError::ConversionEntityError(format!(
                "reservation {} ends before it starts",
                reservation.id
            )));
        }
        Ok(reservation)
    }
}

#[derive(Debug, Deserialize)]
pub struct FlatReservationRow {
    pub reservation_uuid: ReservationId,
    pub user_uuid: UserId,
    pub space_uuid: SpaceId,
    #[serde(default)]
    pub status_uuid: Option<ReservationStatusId>,
    #[serde(default)]
    pub status_name: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_description: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub end_datetime: Option<String>,
    #[serde(default)]
    pub event_price: Option<Decimal>,
    #[serde(default)]
    pub pricing_rule_uuid: Option<PricingRuleId>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_phone: Option<String>,
    #[serde(default)]
    pub space_name: Option<String>,
    #[serde(default)]
    pub space_description: Option<String>,
    #[serde(default)]
    pub space_capacity: Option<i32>,
    #[serde(default)]
    pub space_type_uuid: Option<SpaceTypeId>,
    #[serde(default)]
    pub space_type_name: Option<String>,
    #[serde(default)]
    pub space_main_image: Option<String>,
}

/// Splits `"YYYY-MM-DD HH:MM:SS"` (or the `T`-separated form).
fn split_datetime(raw: &str) -> AppResult<(NaiveDate, NaiveTime)> {
    let (date, time) = raw
        .trim()
        .split_once([' ', 'T'])
        .ok_or_else(|| AppError::ConversionEntityError(format!("invalid datetime: {raw:?}")))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::ConversionEntityError(format!("invalid datetime: {raw:?}")))?;
    let time = time.get(..8).unwrap_or(time);
    Ok((date, parse_clock_time(time)?))
}

fn required<T>(value: Option<T>, what: &str, id: ReservationId) -> AppResult<T> {
    value.ok_or_else(|| {
        AppError::ConversionEntityError(format!("reservation {id} is missing its {what}"))
    })
}

impl TryFrom<FlatReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: FlatReservationRow) -> AppResult<Self> {
        let FlatReservationRow {
            reservation_uuid,
            user_uuid,
            space_uuid,
            status_uuid,
            status_name,
            event_name,
            event_description,
            event_date,
            start_time,
            end_time,
            start_datetime,
            end_datetime,
            event_price,
            pricing_rule_uuid,
            user_name,
            user_email,
            user_phone,
            space_name,
            space_description,
            space_capacity,
            space_type_uuid,
            space_type_name,
            space_main_image,
        } = value;

        let start_parts = start_datetime.as_deref().map(split_datetime).transpose()?;
        let end_parts = end_datetime.as_deref().map(split_datetime).transpose()?;

        let event_date = required(
            event_date.or(start_parts.map(|(date, _)| date)),
            "date",
            reservation_uuid,
        )?;
        let start_time = match start_time {
            Some(raw) => parse_clock_time(&raw)?,
            None => required(start_parts.map(|(_, t)| t), "start time", reservation_uuid)?,
        };
        let end_time = match end_time {
            Some(raw) => parse_clock_time(&raw)?,
            None => required(end_parts.map(|(_, t)| t), "end time", reservation_uuid)?,
        };

        Ok(Reservation {
            id: reservation_uuid,
            reserved_by: user_uuid,
            space_id: space_uuid,
            status_id: status_uuid,
            event_name: event_name.unwrap_or_default(),
            event_description,
            event_date,
            start_time,
            end_time,
            event_price: event_price.unwrap_or_default(),
            pricing_rule_id: pricing_rule_uuid,
            status: status_uuid.map(|id| ReservationStatus {
                id,
                name: status_name.unwrap_or_else(|| "unknown".into()),
            }),
            user: user_name.map(|name| ReservationUser {
                user_id: user_uuid,
                name,
                email: user_email,
                phone: user_phone,
            }),
            space: space_name.map(|name| ReservationSpace {
                space_id: space_uuid,
                name,
                description: space_description,
                capacity: space_capacity,
                space_type_id: space_type_uuid,
                space_type_name,
                image: space_main_image,
            }),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NestedReservationRow {
    pub uuid: ReservationId,
    pub reserved_by: UserId,
    pub space_id: SpaceId,
    #[serde(default)]
    pub status_id: Option<ReservationStatusId>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub event_price: Option<Decimal>,
    #[serde(default)]
    pub pricing_rule_id: Option<PricingRuleId>,
    #[serde(default)]
    pub user: Option<UserRow>,
    #[serde(default)]
    pub space: Option<SpaceRow>,
    #[serde(default)]
    pub status: Option<StatusRow>,
}

impl TryFrom<NestedReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: NestedReservationRow) -> AppResult<Self> {
        let NestedReservationRow {
            uuid,
            reserved_by,
            space_id,
            status_id,
            event_name,
            event_description,
            event_date,
            start_time,
            end_time,
            event_price,
            pricing_rule_id,
            user,
            space,
            status,
        } = value;
        Ok(Reservation {
            id: uuid,
            reserved_by,
            space_id,
            status_id: status_id.or(status.as_ref().map(|s| s.uuid)),
            event_name: event_name.unwrap_or_default(),
            event_description,
            event_date,
            start_time: parse_clock_time(&start_time)?,
            end_time: parse_clock_time(&end_time)?,
            event_price: event_price.unwrap_or_default(),
            pricing_rule_id,
            status: status.map(ReservationStatus::from),
            user: user.map(|u| ReservationUser {
                user_id: u.uuid,
                name: u.name,
                email: Some(u.email),
                phone: u.phone,
            }),
            space: space.map(|s| ReservationSpace {
                space_id: s.uuid,
                name: s.name,
                description: s.description,
                capacity: s.capacity,
                space_type_id: s.spaces_type_id,
                space_type_name: s.space_type.map(|t| t.name),
                image: s.images.and_then(|images| images.into_iter().next()),
            }),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateReservationBody {
    pub space_id: SpaceId,
    pub event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
    pub event_date: NaiveDate,
    #[serde(serialize_with = "serialize_clock_time")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "serialize_clock_time")]
    pub end_time: NaiveTime,
    #[serde(with = "rust_decimal::serde::float")]
    pub event_price: Decimal,
}

impl From<ReservationRequest> for CreateReservationBody {
    fn from(value: ReservationRequest) -> Self {
        let ReservationRequest {
            space_id,
            date,
            start_time,
            end_time,
            price,
            event_name,
            event_description,
        } = value;
        Self {
            space_id,
            event_name,
            event_description,
            event_date: date,
            start_time,
            end_time,
            event_price: price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateReservationBody {
    pub event_name: String,
    pub event_date: NaiveDate,
    #[serde(serialize_with = "serialize_clock_time")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "serialize_clock_time")]
    pub end_time: NaiveTime,
}

impl From<UpdateReservation> for UpdateReservationBody {
    fn from(value: UpdateReservation) -> Self {
        let UpdateReservation {
            reservation_id: _,
            event_name,
            event_date,
            start_time,
            end_time,
        } = value;
        Self {
            event_name,
            event_date,
            start_time,
            end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RESERVATION: &str = "3c9d1f0e-6a2b-4c8d-9e7f-102030405060";
    const USER: &str = "7f1c2a44-2d7b-4a51-9a59-6f1f8f3b2c10";
    const SPACE: &str = "5d2f7a1e-8c43-4f0e-b1f5-1a2b3c4d5e6f";
    const STATUS: &str = "aa0e8400-e29b-41d4-a716-446655440000";

    fn decode(value: serde_json::Value) -> AppResult<Reservation> {
        serde_json::from_value::<ReservationPayload>(value)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))
            .and_then(Reservation::try_from)
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn flat_rows_fall_back_to_datetime_columns() {
        let r = decode(json!({
            "reservation_uuid": RESERVATION,
            "user_uuid": USER,
            "space_uuid": SPACE,
            "status_uuid": STATUS,
            "status_name": "Confirmada",
            "event_name": "Reserva Web",
            "start_datetime": "2026-01-10 09:30:00",
            "end_datetime": "2026-01-10 11:00:00",
            "event_price": "150.00",
            "user_name": "Ana",
            "space_name": "Sala Berlin",
            "space_capacity": 10,
            "space_main_image": "https://img.example/berlin.jpg"
        }))
        .unwrap();
        assert_eq!(r.event_date, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
        assert_eq!((r.start_time, r.end_time), (t(9, 30), t(11, 0)));
        assert_eq!(r.event_price, Decimal::from(150));
        assert_eq!(r.status.as_ref().unwrap().name, "Confirmada");
        assert_eq!(r.space.as_ref().unwrap().image.as_deref(), Some("https://img.example/berlin.jpg"));
        assert_eq!(r.user.as_ref().unwrap().user_id.to_string(), USER);
    }

    #[test]
    fn flat_explicit_columns_win() {
        let r = decode(json!({
            "reservation_uuid": RESERVATION,
            "user_uuid": USER,
            "space_uuid": SPACE,
            "event_date": "2026-01-11",
            "start_time": "08:00",
            "end_time": "09:00:00",
            "start_datetime": "2026-01-10 09:30:00",
        }))
        .unwrap();
        assert_eq!(r.event_date, NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
        assert_eq!((r.start_time, r.end_time), (t(8, 0), t(9, 0)));
        assert_eq!(r.event_price, Decimal::ZERO);
        assert!(r.status.is_none());
    }

    #[test]
    fn flat_rows_without_times_are_rejected() {
        let err = decode(json!({
            "reservation_uuid": RESERVATION,
            "user_uuid": USER,
            "space_uuid": SPACE,
            "event_date": "2026-01-11",
        }))
        .unwrap_err();
        assert!(err.to_string().contains("start time"));
    }

    #[test]
    fn nested_documents_decode_to_the_same_shape() {
        let r = decode(json!({
            "uuid": RESERVATION,
            "reserved_by": USER,
            "space_id": SPACE,
            "event_name": "Board",
            "event_date": "2026-01-12",
            "start_time": "14:00:00",
            "end_time": "16:00:00",
            "event_price": 100,
            "status": { "uuid": STATUS, "name": "Cancelada" },
            "space": { "uuid": SPACE, "name": "Auditorio", "images": ["a.jpg", "b.jpg"] }
        }))
        .unwrap();
        assert!(r.is_cancelled());
        assert_eq!(r.status_id.map(|id| id.to_string()).as_deref(), Some(STATUS));
        assert_eq!(r.space.unwrap().image.as_deref(), Some("a.jpg"));
        assert_eq!(r.event_price, Decimal::from(100));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        assert!(decode(json!({
            "uuid": RESERVATION,
            "reserved_by": USER,
            "space_id": SPACE,
            "event_date": "2026-01-12",
            "start_time": "16:00",
            "end_time": "14:00",
        }))
        .is_err());
    }

    #[test]
    fn create_body_matches_backend_format() {
        let request = ReservationRequest::new(
            SPACE.parse().unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            t(9, 0),
            t(11, 30),
            Decimal::new(125, 0),
            "Reserva Web".into(),
            None,
        );
        assert_eq!(
            serde_json::to_value(CreateReservationBody::from(request)).unwrap(),
            json!({
                "space_id": SPACE,
                "event_name": "Reserva Web",
                "event_date": "2026-01-10",
                "start_time": "09:00",
                "end_time": "11:30",
                "event_price": 125.0
            })
        );
    }
}
