use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{
    id::UserId,
    slot::{minutes_since_midnight, TimeSlot},
};

/// Whether `candidate` can no longer be booked on `selected_date`.
///
/// On the current day every time that is not strictly after `now` is taken.
/// Otherwise the candidate is taken when it falls inside `[start, end)` of any
/// slot. Slots held by `self_id` are ignored, so a reservation being edited
/// does not block itself.
pub fn is_occupied(
    candidate: NaiveTime,
    slots: &[TimeSlot],
    selected_date: NaiveDate,
    now: NaiveDateTime,
    self_id: Option<UserId>,
) -> bool {
    if selected_date == now.date() && candidate <= now.time() {
        return true;
    }

    let minutes = minutes_since_midnight(candidate);
    competing(slots, self_id).any(|slot| slot.contains(minutes))
}

/// First slot that overlaps the requested interval `[start, end)`, or the
/// reason the interval itself cannot be booked.
pub fn first_conflict<'a>(
    start: NaiveTime,
    end: NaiveTime,
    slots: &'a [TimeSlot],
    selected_date: NaiveDate,
    now: NaiveDateTime,
    self_id: Option<UserId>,
) -> Conflict<'a> {
    if selected_date < now.date() || (selected_date == now.date() && start <= now.time()) {
        return Conflict::InThePast;
    }

    let (start, end) = (minutes_since_midnight(start), minutes_since_midnight(end));
    match competing(slots, self_id)
        .filter(|slot| slot.date() == selected_date)
        .find(|slot| slot.overlaps(start, end))
    {
        Some(slot) => Conflict::Reserved(slot),
        None => Conflict::Free,
    }
}

/// Drops the slot of the reservation being edited, and only that one. The
/// occupant's other bookings keep competing.
pub fn exclude_booking(slots: &mut Vec<TimeSlot>, booking: &TimeSlot) {
    if let Some(index) = slots.iter().position(|slot| slot.is_same_booking(booking)) {
        slots.remove(index);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Conflict<'a> {
    Free,
    InThePast,
    Reserved(&'a TimeSlot),
}

fn competing(slots: &[TimeSlot], self_id: Option<UserId>) -> impl Iterator<Item = &TimeSlot> {
    slots
        .iter()
        .filter(move |slot| self_id.map_or(true, |me| !slot.is_held_by(me)))
}
