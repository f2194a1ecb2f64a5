use std::sync::Arc;

use adapter::http::ApiClient;
use adapter::repository::{
    auth::AuthRepositoryImpl, availability::AvailabilityRepositoryImpl,
    pricing_rule::PricingRuleRepositoryImpl, reservation::ReservationRepositoryImpl,
    reservation_status::ReservationStatusRepositoryImpl, space::SpaceRepositoryImpl,
};
use adapter::session::{store::FileSessionStore, SessionContext};
use kernel::model::clock::{Clock, SystemClock};
use kernel::repository::{
    auth::AuthRepository, availability::AvailabilityRepository,
    pricing_rule::PricingRuleRepository, reservation::ReservationRepository,
    reservation_status::ReservationStatusRepository, space::SpaceRepository,
};
use shared::config::{AppConfig, BookingConfig};
use shared::error::AppResult;

#[derive(Clone)]
pub struct AppRegistry {
    space_repository: Arc<dyn SpaceRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
    pricing_rule_repository: Arc<dyn PricingRuleRepository>,
    reservation_status_repository: Arc<dyn ReservationStatusRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    session: Arc<SessionContext>,
    clock: Arc<dyn Clock>,
    booking: BookingConfig,
}

/// Everything the registry holds, for wiring by hand.
pub struct RegistryParts {
    pub space_repository: Arc<dyn SpaceRepository>,
    pub reservation_repository: Arc<dyn ReservationRepository>,
    pub availability_repository: Arc<dyn AvailabilityRepository>,
    pub pricing_rule_repository: Arc<dyn PricingRuleRepository>,
    pub reservation_status_repository: Arc<dyn ReservationStatusRepository>,
    pub auth_repository: Arc<dyn AuthRepository>,
    pub session: Arc<SessionContext>,
    pub clock: Arc<dyn Clock>,
    pub booking: BookingConfig,
}

impl AppRegistry {
    /// Restores the stored session and wires the REST-backed repositories.
    pub async fn new(app_config: &AppConfig) -> AppResult<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = FileSessionStore::new(&app_config.session.dir);
        let session = Arc::new(SessionContext::restore(store, clock.timestamp()).await?);
        let client = ApiClient::new(&app_config.api, session.clone())?;

        Ok(Self::from_parts(RegistryParts {
            space_repository: Arc::new(SpaceRepositoryImpl::new(client.clone())),
            reservation_repository: Arc::new(ReservationRepositoryImpl::new(client.clone())),
            availability_repository: Arc::new(AvailabilityRepositoryImpl::new(client.clone())),
            pricing_rule_repository: Arc::new(PricingRuleRepositoryImpl::new(client.clone())),
            reservation_status_repository: Arc::new(ReservationStatusRepositoryImpl::new(
                client.clone(),
            )),
            auth_repository: Arc::new(AuthRepositoryImpl::new(client)),
            session,
            clock,
            booking: app_config.booking.clone(),
        }))
    }

    pub fn from_parts(parts: RegistryParts) -> Self {
        let RegistryParts {
            space_repository,
            reservation_repository,
            availability_repository,
            pricing_rule_repository,
            reservation_status_repository,
            auth_repository,
            session,
            clock,
            booking,
        } = parts;
        Self {
            space_repository,
            reservation_repository,
            availability_repository,
            pricing_rule_repository,
            reservation_status_repository,
            auth_repository,
            session,
            clock,
            booking,
        }
    }

    pub fn space_repository(&self) -> Arc<dyn SpaceRepository> {
        self.space_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn availability_repository(&self) -> Arc<dyn AvailabilityRepository> {
        self.availability_repository.clone()
    }

    pub fn pricing_rule_repository(&self) -> Arc<dyn PricingRuleRepository> {
        self.pricing_rule_repository.clone()
    }

    pub fn reservation_status_repository(&self) -> Arc<dyn ReservationStatusRepository> {
        self.reservation_status_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn session(&self) -> Arc<SessionContext> {
        self.session.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn booking(&self) -> &BookingConfig {
        &self.booking
    }
}
