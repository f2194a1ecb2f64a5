use chrono::{NaiveDateTime, NaiveTime};

use crate::model::{
    id::UserId,
    reservation::Reservation,
    selection::Selection,
    slot::{format_clock_time, TimeSlot},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Mine,
    Reserved,
    Selected,
}

/// Calendar entries for fetched slots. Slots held by `viewer` show their own
/// label; everybody else's are anonymous.
pub fn slot_entries(slots: &[TimeSlot], viewer: Option<UserId>) -> Vec<CalendarEntry> {
    slots
        .iter()
        .map(|slot| {
            let mine = viewer.is_some_and(|me| slot.is_held_by(me));
            let (name, kind) = if mine {
                (slot.label().unwrap_or("My reservation"), EntryKind::Mine)
            } else {
                ("Reserved", EntryKind::Reserved)
            };
            CalendarEntry {
                start: slot.date().and_time(slot.start_time()),
                end: slot.date().and_time(slot.end_time()),
                title: format!(
                    "{name} ({} - {})",
                    format_clock_time(slot.start_time()),
                    format_clock_time(slot.end_time())
                ),
                kind,
            }
        })
        .collect()
}

/// Back-office view: every live reservation under its event name.
pub fn reservation_entries(reservations: &[Reservation]) -> Vec<CalendarEntry> {
    reservations
        .iter()
        .filter(|r| !r.is_cancelled())
        .map(|r| {
            let name = match r.event_name.trim() {
                "" => "Reserved",
                name => name,
            };
            CalendarEntry {
                start: r.starts_at(),
                end: r.event_date.and_time(r.end_time),
                title: format!(
                    "{name} ({} - {})",
                    format_clock_time(r.start_time),
                    format_clock_time(r.end_time)
                ),
                kind: EntryKind::Reserved,
            }
        })
        .collect()
}

/// One all-day entry per selected day.
pub fn selection_entries(selection: &Selection) -> Vec<CalendarEntry> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    selection
        .days()
        .into_iter()
        .map(|day| CalendarEntry {
            start: day.and_time(NaiveTime::MIN),
            end: day.and_time(end_of_day),
            title: "Selected".into(),
            kind: EntryKind::Selected,
        })
        .collect()
}
