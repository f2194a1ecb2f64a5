//! In-memory stand-ins for the backend, shared by the handler tests.

use std::sync::{Arc, Mutex};

use adapter::session::SessionContext;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use kernel::model::{
    availability::AvailabilityQuery,
    clock::FixedClock,
    id::{PricingRuleId, ReservationId, ReservationStatusId, SpaceId, UserId},
    pricing::{
        event::{CreatePricingRule, UpdatePricingRule},
        PricingRule,
    },
    reservation::{
        event::{CreateReservationStatus, ReservationRequest, UpdateReservation},
        Reservation, ReservationStatus,
    },
    role::Role,
    session::Session,
    slot::TimeSlot,
    space::{
        event::{CreateSpace, DeleteSpace, UpdateSpace},
        Space, SpaceListOptions,
    },
    user::{
        event::{
            ActivateAccount, ChangePassword, Credentials, RegisterUser, ResetPassword,
            UpdateProfile,
        },
        User, UserStatus,
    },
};
use kernel::repository::{
    auth::AuthRepository, availability::AvailabilityRepository,
    pricing_rule::PricingRuleRepository, reservation::ReservationRepository,
    reservation_status::ReservationStatusRepository, space::SpaceRepository,
};
use registry::{AppRegistry, RegistryParts};
use rust_decimal::Decimal;
use shared::{
    config::BookingConfig,
    error::{AppError, AppResult},
};

pub fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn user(role: Role) -> User {
    User {
        id: UserId::new(),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        phone: None,
        role,
        status: UserStatus::Active,
    }
}

pub fn space(rate: Option<i64>) -> Space {
    Space {
        id: SpaceId::new(),
        name: "Sala Berlin".into(),
        description: String::new(),
        capacity: 10,
        space_type_id: None,
        status_id: None,
        pricing_rule_id: None,
        is_active: true,
        images: Vec::new(),
        space_type: None,
        status: None,
        pricing_rule: rate.map(|rate| PricingRule {
            id: PricingRuleId::new(),
            name: "Standard".into(),
            hourly_rate: Decimal::from(rate),
            description: None,
        }),
        availability_status: None,
    }
}

pub fn reservation(
    owner: UserId,
    space_id: SpaceId,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Reservation {
    Reservation {
        id: ReservationId::new(),
        reserved_by: owner,
        space_id,
        status_id: None,
        event_name: "Board".into(),
        event_description: None,
        event_date: date,
        start_time: start,
        end_time: end,
        event_price: Decimal::from(100),
        pricing_rule_id: None,
        status: None,
        user: None,
        space: None,
    }
}

#[derive(Default)]
pub struct State {
    pub spaces: Vec<Space>,
    pub slots: Vec<TimeSlot>,
    pub reservations: Vec<Reservation>,
    pub submitted: Vec<ReservationRequest>,
    pub updates: Vec<UpdateReservation>,
    pub availability_queries: Vec<AvailabilityQuery>,
    pub pricing_rules: Vec<PricingRule>,
    pub statuses: Vec<ReservationStatus>,
    pub availability_down: bool,
    pub reject_day: Option<NaiveDate>,
    pub profile: Option<User>,
    pub logged_out: bool,
    pub account_calls: Vec<String>,
    pub taken_emails: Vec<String>,
    pub email_check_down: bool,
}

#[derive(Default)]
pub struct FakeBackend {
    pub state: Mutex<State>,
}

impl FakeBackend {
    pub fn with(f: impl FnOnce(&mut State)) -> Arc<Self> {
        let backend = Self::default();
        f(&mut *backend.state.lock().unwrap());
        Arc::new(backend)
    }

    pub fn read<R>(&self, f: impl FnOnce(&State) -> R) -> R {
        f(&*self.state.lock().unwrap())
    }
}

pub fn registry(
    backend: &Arc<FakeBackend>,
    session: Option<Session>,
    now: NaiveDateTime,
) -> AppRegistry {
    AppRegistry::from_parts(RegistryParts {
        space_repository: backend.clone(),
        reservation_repository: backend.clone(),
        availability_repository: backend.clone(),
        pricing_rule_repository: backend.clone(),
        reservation_status_repository: backend.clone(),
        auth_repository: backend.clone(),
        session: Arc::new(SessionContext::in_memory(session)),
        clock: Arc::new(FixedClock(now)),
        booking: BookingConfig::default(),
    })
}

pub fn signed_in(user: &User) -> Option<Session> {
    Some(Session {
        token: "h.e30.s".into(),
        user: Some(user.clone()),
    })
}

#[async_trait]
impl SpaceRepository for FakeBackend {
    async fn find_all(&self, _options: SpaceListOptions) -> AppResult<Vec<Space>> {
        Ok(self.read(|s| s.spaces.clone()))
    }

    async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
        Ok(self.read(|s| s.spaces.iter().find(|sp| sp.id == space_id).cloned()))
    }

    async fn create(&self, event: CreateSpace) -> AppResult<Space> {
        let mut created = space(None);
        created.name = event.name;
        created.capacity = event.capacity;
        self.state.lock().unwrap().spaces.push(created.clone());
        Ok(created)
    }

    async fn update(&self, event: UpdateSpace) -> AppResult<Space> {
        let mut state = self.state.lock().unwrap();
        let found = state
            .spaces
            .iter_mut()
            .find(|sp| sp.id == event.space_id)
            .ok_or_else(|| AppError::EntityNotFound("space".into()))?;
        if let Some(name) = event.name {
            found.name = name;
        }
        Ok(found.clone())
    }

    async fn delete(&self, event: DeleteSpace) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .spaces
            .retain(|sp| sp.id != event.space_id);
        Ok(())
    }
}

#[async_trait]
impl AvailabilityRepository for FakeBackend {
    async fn find_slots(&self, query: &AvailabilityQuery) -> AppResult<Vec<TimeSlot>> {
        let mut state = self.state.lock().unwrap();
        state.availability_queries.push(*query);
        if state.availability_down {
            return Err(AppError::ServerError(503));
        }
        Ok(state
            .slots
            .iter()
            .filter(|slot| query.contains(slot.date()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationRepository for FakeBackend {
    async fn find_mine(&self, _status: Option<String>) -> AppResult<Vec<Reservation>> {
        Ok(self.read(|s| s.reservations.clone()))
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        self.read(|s| s.reservations.iter().find(|r| r.id == reservation_id).cloned())
            .ok_or_else(|| AppError::EntityNotFound("Reservation not found".into()))
    }

    async fn create(&self, request: ReservationRequest) -> AppResult<Reservation> {
        let mut state = self.state.lock().unwrap();
        if state.reject_day == Some(request.date) {
            return Err(AppError::UnprocessableEntity("slot taken".into()));
        }
        let created = reservation(
            UserId::new(),
            request.space_id,
            request.date,
            request.start_time,
            request.end_time,
        );
        state.submitted.push(request);
        Ok(created)
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<Reservation> {
        let mut state = self.state.lock().unwrap();
        let found = state
            .reservations
            .iter_mut()
            .find(|r| r.id == event.reservation_id)
            .ok_or_else(|| AppError::EntityNotFound("Reservation not found".into()))?;
        found.event_name = event.event_name.clone();
        found.event_date = event.event_date;
        found.start_time = event.start_time;
        found.end_time = event.end_time;
        let updated = found.clone();
        state.updates.push(event);
        Ok(updated)
    }

    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let mut state = self.state.lock().unwrap();
        let found = state
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| AppError::EntityNotFound("Reservation not found".into()))?;
        found.status = Some(ReservationStatus {
            id: ReservationStatusId::new(),
            name: "Cancelada".into(),
        });
        Ok(found.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.read(|s| s.reservations.clone()))
    }
}

#[async_trait]
impl PricingRuleRepository for FakeBackend {
    async fn find_all(&self) -> AppResult<Vec<PricingRule>> {
        Ok(self.read(|s| s.pricing_rules.clone()))
    }

    async fn create(&self, event: CreatePricingRule) -> AppResult<PricingRule> {
        let rule = PricingRule {
            id: PricingRuleId::new(),
            name: event.name,
            hourly_rate: event.hourly_rate,
            description: event.description,
        };
        self.state.lock().unwrap().pricing_rules.push(rule.clone());
        Ok(rule)
    }

    async fn update(&self, event: UpdatePricingRule) -> AppResult<PricingRule> {
        let mut state = self.state.lock().unwrap();
        let rule = state
            .pricing_rules
            .iter_mut()
            .find(|r| r.id == event.pricing_rule_id)
            .ok_or_else(|| AppError::EntityNotFound("pricing rule".into()))?;
        if let Some(rate) = event.hourly_rate {
            rule.hourly_rate = rate;
        }
        Ok(rule.clone())
    }

    async fn delete(&self, pricing_rule_id: PricingRuleId) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .pricing_rules
            .retain(|r| r.id != pricing_rule_id);
        Ok(())
    }
}

#[async_trait]
impl ReservationStatusRepository for FakeBackend {
    async fn find_all(&self) -> AppResult<Vec<ReservationStatus>> {
        Ok(self.read(|s| s.statuses.clone()))
    }

    async fn create(&self, event: CreateReservationStatus) -> AppResult<ReservationStatus> {
        let status = ReservationStatus {
            id: ReservationStatusId::new(),
            name: event.name,
        };
        self.state.lock().unwrap().statuses.push(status.clone());
        Ok(status)
    }

    async fn delete(&self, status_id: ReservationStatusId) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .statuses
            .retain(|s| s.id != status_id);
        Ok(())
    }
}

#[async_trait]
impl AuthRepository for FakeBackend {
    async fn login(&self, credentials: Credentials) -> AppResult<Session> {
        if credentials.password != "secret-pass" {
            return Err(AppError::UnauthorizedError);
        }
        Ok(Session::new("h.e30.s"))
    }

    async fn logout(&self) -> AppResult<()> {
        self.state.lock().unwrap().logged_out = true;
        Err(AppError::ServerError(500))
    }

    async fn fetch_current_user(&self) -> AppResult<User> {
        self.read(|s| s.profile.clone())
            .ok_or(AppError::UnauthorizedError)
    }

    async fn register(&self, event: RegisterUser) -> AppResult<User> {
        Ok(User {
            id: UserId::new(),
            name: event.name,
            email: event.email,
            phone: Some(event.phone),
            role: Role::User,
            status: UserStatus::Pending,
        })
    }

    async fn activate_account(&self, event: ActivateAccount) -> AppResult<()> {
        let call = format!("activate:{}:{}", event.token, event.activation_code);
        self.state.lock().unwrap().account_calls.push(call);
        Ok(())
    }

    async fn change_password(&self, event: ChangePassword) -> AppResult<()> {
        if event.current_password != "secret-pass" {
            return Err(AppError::UnprocessableEntity(
                "The current password is incorrect.".into(),
            ));
        }
        let call = format!("change-password:{}", event.new_password);
        self.state.lock().unwrap().account_calls.push(call);
        Ok(())
    }

    async fn forgot_password(&self, email: String) -> AppResult<()> {
        let call = format!("forgot-password:{email}");
        self.state.lock().unwrap().account_calls.push(call);
        Ok(())
    }

    async fn reset_password(&self, event: ResetPassword) -> AppResult<()> {
        let call = format!("reset-password:{}", event.token);
        self.state.lock().unwrap().account_calls.push(call);
        Ok(())
    }

    async fn update_profile(&self, event: UpdateProfile) -> AppResult<User> {
        let mut state = self.state.lock().unwrap();
        let profile = state.profile.as_mut().ok_or(AppError::UnauthorizedError)?;
        if let Some(name) = event.name {
            profile.name = name;
        }
        if let Some(email) = event.email {
            profile.email = email;
        }
        if event.phone.is_some() {
            profile.phone = event.phone;
        }
        Ok(profile.clone())
    }

    async fn check_email(&self, email: String) -> AppResult<bool> {
        self.read(|s| {
            if s.email_check_down {
                Err(AppError::ServerError(503))
            } else {
                Ok(!s.taken_emails.contains(&email))
            }
        })
    }
}
