use chrono::{Datelike, NaiveDate, NaiveTime};
use garde::Validate;
use kernel::booking::{
    conflict::{first_conflict, is_occupied, Conflict},
    price::{day_count, per_day_price, total_price},
    range::build_requests,
};
use kernel::model::{
    availability::{month_bounds, Availability, AvailabilityQuery},
    calendar::{selection_entries, slot_entries, CalendarEntry},
    id::SpaceId,
    reservation::{event::ReservationRequest, Reservation},
    selection::{DateEntry, Selection},
    slot::{time_options, TimeSlot},
    space::Space,
};
use registry::AppRegistry;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

use crate::handler::unknown_unless_login;
use crate::model::{
    reservation::BookingConfirmation,
    space::{BookingForm, SpaceFilterForm, TimeOption},
};

const DEFAULT_EVENT_NAME: &str = "Web reservation";

pub struct SpaceCatalogView {
    registry: AppRegistry,
}

impl SpaceCatalogView {
    pub fn new(registry: AppRegistry) -> Self {
        Self { registry }
    }

    pub async fn search(&self, filters: SpaceFilterForm) -> AppResult<Vec<Space>> {
        filters.validate()?;
        self.registry
            .space_repository()
            .find_all(filters.into())
            .await
    }
}

/// A single space with its month calendar, the time pickers and the booking
/// form.
pub struct SpaceDetailView {
    registry: AppRegistry,
    space: Space,
    /// First day of the month shown in the calendar.
    visible_month: NaiveDate,
    selection: Selection,
    month: Availability,
    selected: Availability,
}

impl SpaceDetailView {
    pub async fn load(registry: AppRegistry, space_id: SpaceId) -> AppResult<Self> {
        let space = registry
            .space_repository()
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("space {space_id} not found")))?;
        let today = registry.clock().today();
        let visible_month = today.with_day(1).unwrap_or(today);
        Ok(Self {
            registry,
            space,
            visible_month,
            selection: Selection::new(),
            month: Availability::NotLoaded,
            selected: Availability::NotLoaded,
        })
    }

    pub fn space(&self) -> &Space {
        &self.space
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn visible_month(&self) -> NaiveDate {
        self.visible_month
    }

    pub fn hourly_rate(&self) -> Decimal {
        self.space
            .hourly_rate_or(self.registry.booking().default_hourly_rate)
    }

    async fn fetch(&self, query: Option<AvailabilityQuery>) -> AppResult<Vec<TimeSlot>> {
        match query {
            // nothing left to book in that range
            None => Ok(Vec::new()),
            Some(query) => {
                self.registry
                    .availability_repository()
                    .find_slots(&query)
                    .await
            }
        }
    }

    /// Refreshes the occupied slots of the visible month. On failure the
    /// calendar is marked unknown and the error is returned.
    pub async fn fetch_month_availability(&mut self) -> AppResult<()> {
        let today = self.registry.clock().today();
        let query = AvailabilityQuery::for_month(self.space.id, self.visible_month, today);
        match self.fetch(query).await {
            Ok(slots) => {
                if let (Some(query), Some(start)) = (query, self.selection.start_date()) {
                    let end = self.selection.end_date().unwrap_or(start);
                    if query.contains(start) && query.contains(end) {
                        self.selected = Availability::Known(slots.clone());
                    }
                }
                self.month = Availability::Known(slots);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, space = %self.space.id, "month availability failed");
                self.month = Availability::Unknown(e.to_string());
                Err(unknown_unless_login(e))
            }
        }
    }

    /// Fetches the occupied slots for the selected day or range.
    pub async fn check_availability(&mut self) -> AppResult<()> {
        let Some(start) = self.selection.start_date() else {
            return Err(AppError::InvalidInput("choose a date first".into()));
        };
        let end = self.selection.end_date().unwrap_or(start);
        let today = self.registry.clock().today();
        let query = AvailabilityQuery::for_range(self.space.id, start, end, today);
        match self.fetch(query).await {
            Ok(slots) => {
                self.selected = Availability::Known(slots);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, space = %self.space.id, "availability check failed");
                self.selected = Availability::Unknown(e.to_string());
                Err(unknown_unless_login(e))
            }
        }
    }

    pub async fn view_month(&mut self, day: NaiveDate) -> AppResult<()> {
        self.visible_month = month_bounds(day).map_or(day, |(first, _)| first);
        self.fetch_month_availability().await
    }

    /// Applies a click on the calendar. Days outside the visible month are
    /// ignored.
    pub async fn day_clicked(&mut self, date: NaiveDate) -> AppResult<()> {
        if (date.year(), date.month()) != (self.visible_month.year(), self.visible_month.month()) {
            return Ok(());
        }
        let today = self.registry.clock().today();
        self.selection.click(date, today)?;
        self.selected = Availability::NotLoaded;
        self.fetch_month_availability().await?;
        self.check_unless_covered().await
    }

    /// Typed date entry. A past date is replaced by today, which the caller
    /// should point out to the user.
    pub async fn set_date(&mut self, date: NaiveDate) -> AppResult<DateEntry> {
        let today = self.registry.clock().today();
        let entry = self.selection.set_date(date, today);
        self.selected = Availability::NotLoaded;
        if let Some(start) = self.selection.start_date() {
            self.visible_month = start.with_day(1).unwrap_or(start);
        }
        self.fetch_month_availability().await?;
        self.check_unless_covered().await?;
        Ok(entry)
    }

    /// Typed entry of a whole range: `start` as with [`Self::set_date`], then
    /// `until` as the last day. An `until` before `start` is refused before
    /// anything is selected.
    pub async fn select_range(
        &mut self,
        start: NaiveDate,
        until: Option<NaiveDate>,
    ) -> AppResult<DateEntry> {
        if until.is_some_and(|until| until < start) {
            return Err(AppError::InvalidInput(
                "the last day must not be before the first day".into(),
            ));
        }
        let entry = self.set_date(start).await?;
        let first = self.selection.start_date();
        if let (Some(until), Some(first)) = (until, first) {
            if until < first {
                // the first day was moved to today
                return Err(AppError::InvalidInput(
                    "past dates cannot be selected".into(),
                ));
            }
            if until > first {
                if (until.year(), until.month()) != (first.year(), first.month()) {
                    self.view_month(until).await?;
                }
                self.day_clicked(until).await?;
            }
        }
        Ok(entry)
    }

    // the month fetch already answers for a selection inside that month
    async fn check_unless_covered(&mut self) -> AppResult<()> {
        if self.selection.start_date().is_none() || self.selected.is_known() {
            return Ok(());
        }
        self.check_availability().await
    }

    pub fn select_times(&mut self, start: NaiveTime, end: NaiveTime) -> AppResult<()> {
        if end <= start {
            return Err(AppError::InvalidInput(
                "the end time must be after the start time".into(),
            ));
        }
        self.selection.set_times(Some(start), Some(end));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.selected = Availability::NotLoaded;
    }

    /// Whether `time` is unavailable on any selected day. Without a date, or
    /// while availability is not confirmed, every time reads as taken.
    pub fn is_slot_occupied(&self, time: NaiveTime) -> bool {
        let Ok(slots) = self.selected.slots() else {
            return true;
        };
        let days = self.selection.days();
        if days.is_empty() {
            return true;
        }
        let now = self.registry.clock().now();
        days.into_iter().any(|day| {
            let on_day: Vec<TimeSlot> =
                slots.iter().filter(|s| s.date() == day).cloned().collect();
            is_occupied(time, &on_day, day, now, None)
        })
    }

    pub fn time_slots(&self) -> Vec<TimeOption> {
        time_options()
            .into_iter()
            .map(|time| TimeOption {
                time,
                occupied: self.is_slot_occupied(time),
            })
            .collect()
    }

    /// Total for the current selection, fee included; `None` until a date and
    /// both times are chosen.
    pub fn total_price(&self) -> Option<Decimal> {
        let start_date = self.selection.start_date()?;
        let (start, end) = (self.selection.start_time()?, self.selection.end_time()?);
        Some(total_price(
            start,
            end,
            self.hourly_rate(),
            day_count(start_date, self.selection.end_date()),
            self.registry.booking().service_fee,
        ))
    }

    pub async fn calendar_entries(&self) -> Vec<CalendarEntry> {
        let viewer = self
            .registry
            .session()
            .current_user()
            .await
            .map(|user| user.id);
        let mut entries = match self.month.slots() {
            Ok(slots) => slot_entries(slots, viewer),
            Err(_) => Vec::new(),
        };
        entries.extend(selection_entries(&self.selection));
        entries
    }

    /// Books the selection, one reservation per day. Everything that can be
    /// checked locally is checked before the first request; days are then
    /// submitted in order and the run stops at the first rejection, keeping
    /// the days already created.
    pub async fn reserve(&mut self, form: BookingForm) -> AppResult<BookingConfirmation> {
        if !self.registry.session().is_authenticated().await {
            return Err(AppError::UnauthenticatedError);
        }
        form.validate()?;

        let BookingForm {
            event_name,
            event_description,
        } = form;
        let event_name = event_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EVENT_NAME.into());
        let (Some(start), Some(end)) = (self.selection.start_time(), self.selection.end_time())
        else {
            return Err(AppError::InvalidInput(
                "choose a date, a start time and an end time".into(),
            ));
        };
        let requests = build_requests(
            self.space.id,
            &self.selection,
            per_day_price(start, end, self.hourly_rate()),
            &event_name,
            event_description.as_deref(),
        )?;
        let total = self.total_price().unwrap_or_default();

        let slots = self.selected.slots()?;
        let now = self.registry.clock().now();
        for request in &requests {
            match first_conflict(start, end, slots, request.date, now, None) {
                Conflict::Free => {}
                Conflict::InThePast => {
                    return Err(AppError::InvalidInput(format!(
                        "{} at {} has already passed",
                        request.date,
                        start.format("%H:%M")
                    )))
                }
                Conflict::Reserved(slot) => {
                    return Err(AppError::SlotConflict {
                        date: slot.date(),
                        start: slot.start_time(),
                        end: slot.end_time(),
                    })
                }
            }
        }

        let reservations = self.submit(requests).await?;
        tracing::info!(space = %self.space.id, days = reservations.len(), "booking created");

        self.clear_selection();
        if let Err(e) = self.fetch_month_availability().await {
            tracing::warn!(error = %e, "could not refresh the calendar after booking");
        }
        Ok(BookingConfirmation {
            reservations,
            total,
        })
    }

    async fn submit(&self, requests: Vec<ReservationRequest>) -> AppResult<Vec<Reservation>> {
        let repository = self.registry.reservation_repository();
        let mut created = Vec::with_capacity(requests.len());
        let mut created_days = Vec::with_capacity(requests.len());
        for request in requests {
            let date = request.date;
            match repository.create(request).await {
                Ok(reservation) => {
                    created.push(reservation);
                    created_days.push(date);
                }
                Err(e) if created_days.is_empty() => return Err(e),
                Err(e) => {
                    tracing::error!(error = %e, failed_on = %date, "multi-day booking stopped");
                    return Err(AppError::PartialBooking {
                        created: created_days,
                        failed_on: date,
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::fake::{self, d, t, FakeBackend};
    use chrono::NaiveDateTime;
    use kernel::model::{id::UserId, role::Role, selection::DateSelection};
    use std::sync::Arc;

    // Friday 2026-01-09, 08:00
    fn now() -> NaiveDateTime {
        d(1, 9).and_time(t(8, 0))
    }

    async fn open_view(backend: &Arc<FakeBackend>, signed_in: bool) -> SpaceDetailView {
        let space_id = backend.read(|s| s.spaces[0].id);
        let session = if signed_in {
            fake::signed_in(&fake::user(Role::User))
        } else {
            None
        };
        SpaceDetailView::load(fake::registry(backend, session, now()), space_id)
            .await
            .unwrap()
    }

    fn backend_with(
        rate: Option<i64>,
        f: impl FnOnce(&mut fake::State, SpaceId),
    ) -> Arc<FakeBackend> {
        FakeBackend::with(|s| {
            let space = fake::space(rate);
            let id = space.id;
            s.spaces.push(space);
            f(s, id);
        })
    }

    async fn pick_range(view: &mut SpaceDetailView) {
        view.day_clicked(d(1, 10)).await.unwrap();
        view.day_clicked(d(1, 12)).await.unwrap();
        view.select_times(t(9, 0), t(11, 0)).unwrap();
    }

    #[tokio::test]
    async fn month_query_starts_today() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        view.fetch_month_availability().await.unwrap();
        let query = backend.read(|s| s.availability_queries[0]);
        assert_eq!((query.start_date, query.end_date), (d(1, 9), d(1, 31)));
    }

    #[tokio::test]
    async fn past_month_is_not_fetched() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        view.view_month(NaiveDate::from_ymd_opt(2025, 12, 3).unwrap())
            .await
            .unwrap();
        assert!(backend.read(|s| s.availability_queries.is_empty()));
        assert!(view.calendar_entries().await.is_empty());
    }

    #[tokio::test]
    async fn clicks_outside_the_visible_month_are_ignored() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        view.day_clicked(d(2, 3)).await.unwrap();
        assert!(view.selection().is_empty());
    }

    #[tokio::test]
    async fn three_day_range_submits_three_requests() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, true).await;
        pick_range(&mut view).await;
        assert_eq!(view.total_price(), Some(Decimal::from(315)));

        let confirmation = view.reserve(BookingForm::default()).await.unwrap();
        assert_eq!(confirmation.reservations.len(), 3);
        assert_eq!(confirmation.total, Decimal::from(315));

        let submitted = backend.read(|s| s.submitted.clone());
        let days: Vec<_> = submitted.iter().map(|r| r.date).collect();
        assert_eq!(days, [d(1, 10), d(1, 11), d(1, 12)]);
        assert!(submitted.iter().all(|r| r.price == Decimal::from(100)
            && r.start_time == t(9, 0)
            && r.end_time == t(11, 0)
            && r.event_name == DEFAULT_EVENT_NAME));
        assert!(view.selection().is_empty());
    }

    #[tokio::test]
    async fn missing_rate_falls_back_to_default() {
        let backend = backend_with(None, |_, _| {});
        let mut view = open_view(&backend, true).await;
        view.day_clicked(d(1, 10)).await.unwrap();
        view.select_times(t(9, 0), t(11, 0)).unwrap();
        assert_eq!(view.total_price(), Some(Decimal::from(115)));
    }

    #[tokio::test]
    async fn booking_requires_a_session() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        pick_range(&mut view).await;
        let err = view.reserve(BookingForm::default()).await.unwrap_err();
        assert!(matches!(err, AppError::UnauthenticatedError));
        assert!(backend.read(|s| s.submitted.is_empty()));
    }

    #[tokio::test]
    async fn incomplete_selection_is_rejected_locally() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, true).await;
        view.day_clicked(d(1, 10)).await.unwrap();
        assert!(view.select_times(t(11, 0), t(9, 0)).is_err());
        let err = view.reserve(BookingForm::default()).await.unwrap_err();
        assert!(err.is_validation());
        assert!(backend.read(|s| s.submitted.is_empty()));
    }

    #[tokio::test]
    async fn conflicting_day_blocks_the_whole_booking() {
        let backend = backend_with(Some(50), |s, _| {
            s.slots.push(
                TimeSlot::new(d(1, 11), t(10, 0), t(12, 0), Some(UserId::new()), None).unwrap(),
            );
        });
        let mut view = open_view(&backend, true).await;
        pick_range(&mut view).await;
        assert!(view.is_slot_occupied(t(10, 30)));
        assert!(!view.is_slot_occupied(t(12, 0)));

        let err = view.reserve(BookingForm::default()).await.unwrap_err();
        assert!(matches!(err, AppError::SlotConflict { date, .. } if date == d(1, 11)));
        assert!(backend.read(|s| s.submitted.is_empty()));
    }

    #[tokio::test]
    async fn unknown_availability_fails_closed() {
        let backend = backend_with(Some(50), |s, _| s.availability_down = true);
        let mut view = open_view(&backend, true).await;
        let err = view.day_clicked(d(1, 10)).await.unwrap_err();
        assert!(matches!(err, AppError::AvailabilityUnknown(_)));
        assert_eq!(view.selection().start_date(), Some(d(1, 10)));

        view.select_times(t(9, 0), t(11, 0)).unwrap();
        assert!(view.time_slots().iter().all(|option| option.occupied));
        let err = view.reserve(BookingForm::default()).await.unwrap_err();
        assert!(matches!(err, AppError::AvailabilityUnknown(_)));
        assert!(backend.read(|s| s.submitted.is_empty()));
    }

    #[tokio::test]
    async fn rejected_day_reports_what_was_kept() {
        let backend = backend_with(Some(50), |s, _| s.reject_day = Some(d(1, 12)));
        let mut view = open_view(&backend, true).await;
        pick_range(&mut view).await;
        match view.reserve(BookingForm::default()).await.unwrap_err() {
            AppError::PartialBooking {
                created, failed_on, ..
            } => {
                assert_eq!(created, [d(1, 10), d(1, 11)]);
                assert_eq!(failed_on, d(1, 12));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(backend.read(|s| s.submitted.len()), 2);
    }

    #[tokio::test]
    async fn rejection_of_the_first_day_is_passed_through() {
        let backend = backend_with(Some(50), |s, _| s.reject_day = Some(d(1, 10)));
        let mut view = open_view(&backend, true).await;
        pick_range(&mut view).await;
        let err = view.reserve(BookingForm::default()).await.unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
        assert!(backend.read(|s| s.submitted.is_empty()));
    }

    #[tokio::test]
    async fn earlier_hours_of_today_are_taken() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        view.day_clicked(d(1, 9)).await.unwrap();
        let options = view.time_slots();
        assert_eq!(options.len(), 26);
        assert!(options[0].occupied);
        assert!(!options[1].occupied);
    }

    #[tokio::test]
    async fn typed_past_date_becomes_today() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        let entry = view.set_date(d(1, 2)).await.unwrap();
        assert_eq!(entry, DateEntry::ClampedToToday);
        assert_eq!(view.selection().start_date(), Some(d(1, 9)));
    }

    #[tokio::test]
    async fn click_inside_the_fetched_month_is_not_fetched_again() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        view.day_clicked(d(1, 10)).await.unwrap();
        assert_eq!(backend.read(|s| s.availability_queries.len()), 1);
        assert!(!view.is_slot_occupied(t(9, 0)));
    }

    #[tokio::test]
    async fn range_into_the_next_month_is_checked_as_a_whole() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        view.select_range(d(1, 30), Some(d(2, 2))).await.unwrap();

        assert_eq!(
            view.selection().dates(),
            DateSelection::RangePicked {
                start: d(1, 30),
                end: d(2, 2)
            }
        );
        let last = backend.read(|s| *s.availability_queries.last().unwrap());
        assert_eq!((last.start_date, last.end_date), (d(1, 30), d(2, 2)));
    }

    #[tokio::test]
    async fn range_ending_before_it_starts_is_refused() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        let err = view
            .select_range(d(1, 20), Some(d(1, 15)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(view.selection().dates(), DateSelection::Empty);
        assert!(backend.read(|s| s.availability_queries.is_empty()));
    }

    #[tokio::test]
    async fn range_from_a_past_day_starts_today() {
        let backend = backend_with(Some(50), |_, _| {});
        let mut view = open_view(&backend, false).await;
        let entry = view.select_range(d(1, 2), Some(d(1, 11))).await.unwrap();

        assert_eq!(entry, DateEntry::ClampedToToday);
        assert_eq!(view.selection().days(), vec![d(1, 9), d(1, 10), d(1, 11)]);
    }
}
