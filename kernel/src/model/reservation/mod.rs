use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use shared::error::AppResult;

use crate::model::{
    id::{PricingRuleId, ReservationId, ReservationStatusId, SpaceId, SpaceTypeId, UserId},
    slot::TimeSlot,
};

pub mod event;

const CANCELLED_STATUS_NAMES: [&str; 3] = ["cancelada", "cancelled", "canceled"];

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: ReservationId,
    pub reserved_by: UserId,
    pub space_id: SpaceId,
    pub status_id: Option<ReservationStatusId>,
    pub event_name: String,
    pub event_description: Option<String>,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub event_price: Decimal,
    pub pricing_rule_id: Option<PricingRuleId>,
    pub status: Option<ReservationStatus>,
    pub user: Option<ReservationUser>,
    pub space: Option<ReservationSpace>,
}

impl Reservation {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.event_date.and_time(self.start_time)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.as_ref().is_some_and(ReservationStatus::is_cancelled)
    }

    /// A reservation can be edited or cancelled while it is not cancelled and
    /// its start is at least `lead_hours` away.
    pub fn can_change(&self, now: NaiveDateTime, lead_hours: i64) -> bool {
        !self.is_cancelled() && self.starts_at() - now >= Duration::hours(lead_hours)
    }

    pub fn to_slot(&self) -> AppResult<TimeSlot> {
        TimeSlot::new(
            self.event_date,
            self.start_time,
            self.end_time,
            Some(self.reserved_by),
            Some(self.event_name.clone()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationStatus {
    pub id: ReservationStatusId,
    pub name: String,
}

impl ReservationStatus {
    pub fn is_cancelled(&self) -> bool {
        let name = self.name.trim().to_lowercase();
        CANCELLED_STATUS_NAMES.contains(&name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationUser {
    pub user_id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationSpace {
    pub space_id: SpaceId,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub space_type_id: Option<SpaceTypeId>,
    pub space_type_name: Option<String>,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reservation(status: Option<&str>) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            reserved_by: UserId::new(),
            space_id: SpaceId::new(),
            status_id: None,
            event_name: "Planning".into(),
            event_description: None,
            event_date: NaiveDate::from_ymd_opt(2026, 5, 4).unwrap(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            event_price: Decimal::new(100, 0),
            pricing_rule_id: None,
            status: status.map(|name| ReservationStatus {
                id: ReservationStatusId::new(),
                name: name.into(),
            }),
            user: None,
            space: None,
        }
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 4)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[rstest]
    #[case(at(8, 0), true)]
    #[case(at(9, 0), true)]
    #[case(at(9, 1), false)]
    #[case(at(11, 0), false)]
    fn change_window_closes_an_hour_before_start(
        #[case] now: NaiveDateTime,
        #[case] expected: bool,
    ) {
        assert_eq!(reservation(Some("Confirmada")).can_change(now, 1), expected);
    }

    #[rstest]
    #[case("Cancelada")]
    #[case("cancelled")]
    #[case(" CANCELED ")]
    fn cancelled_reservations_are_frozen(#[case] status: &str) {
        let r = reservation(Some(status));
        assert!(r.is_cancelled());
        assert!(!r.can_change(at(0, 0), 1));
    }

    #[test]
    fn reservation_projects_to_its_own_slot() {
        let r = reservation(None);
        let slot = r.to_slot().unwrap();
        assert!(slot.is_held_by(r.reserved_by));
        assert_eq!(slot.label(), Some("Planning"));
    }
}
