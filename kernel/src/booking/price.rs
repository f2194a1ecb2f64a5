use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::model::slot::minutes_since_midnight;

/// Length of `[start, end)` in hours, zero when the end is not after the start.
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> Decimal {
    let start = minutes_since_midnight(start);
    let end = minutes_since_midnight(end);
    if end <= start {
        return Decimal::ZERO;
    }
    Decimal::from(end - start) / Decimal::from(60)
}

/// Inclusive number of days from `start` to `end`; one without an end.
pub fn day_count(start: NaiveDate, end: Option<NaiveDate>) -> u32 {
    match end {
        Some(end) if end > start => {
            let span = u32::try_from((end - start).num_days()).unwrap_or(u32::MAX - 1);
            span + 1
        }
        _ => 1,
    }
}

/// Price of one day of the booking, sent with every per-day request.
pub fn per_day_price(start: NaiveTime, end: NaiveTime, hourly_rate: Decimal) -> Decimal {
    duration_hours(start, end) * hourly_rate
}

/// Total shown to the user. The service fee is charged once, however many
/// days are booked, and nothing is charged for an empty interval.
pub fn total_price(
    start: NaiveTime,
    end: NaiveTime,
    hourly_rate: Decimal,
    days: u32,
    service_fee: Decimal,
) -> Decimal {
    let hours = duration_hours(start, end);
    if hours.is_zero() {
        return Decimal::ZERO;
    }
    hours * hourly_rate * Decimal::from(days) + service_fee
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[rstest]
    #[case(t(10, 0), t(12, 0), 1, dec(115))]
    #[case(t(10, 0), t(12, 0), 3, dec(315))]
    #[case(t(12, 0), t(12, 0), 1, Decimal::ZERO)]
    #[case(t(12, 0), t(10, 0), 3, Decimal::ZERO)]
    #[case(t(9, 0), t(10, 30), 1, Decimal::new(90, 0))]
    fn totals(
        #[case] start: NaiveTime,
        #[case] end: NaiveTime,
        #[case] days: u32,
        #[case] expected: Decimal,
    ) {
        assert_eq!(total_price(start, end, dec(50), days, dec(15)), expected);
    }

    #[test]
    fn per_day_price_excludes_the_fee() {
        assert_eq!(per_day_price(t(10, 0), t(12, 0), dec(50)), dec(100));
        assert_eq!(per_day_price(t(10, 0), t(10, 0), dec(50)), Decimal::ZERO);
    }

    #[test]
    fn half_hours_are_priced_exactly() {
        assert_eq!(duration_hours(t(8, 0), t(8, 30)), Decimal::new(5, 1));
    }

    #[test]
    fn day_count_is_inclusive() {
        let d = |day| NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
        assert_eq!(day_count(d(10), None), 1);
        assert_eq!(day_count(d(10), Some(d(10))), 1);
        assert_eq!(day_count(d(10), Some(d(12))), 3);
    }
}
