use chrono::NaiveDate;
use garde::Validate;
use kernel::model::{
    availability::month_bounds,
    calendar::{reservation_entries, CalendarEntry},
    id::{PricingRuleId, ReservationStatusId, SpaceId},
    pricing::PricingRule,
    reservation::{Reservation, ReservationStatus},
    space::{event::DeleteSpace, Space, SpaceListOptions},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::handler::signed_in_user;
use crate::model::admin::{
    CreateSpaceForm, PricingRuleForm, PricingRuleFormWithId, StatusForm, UpdateSpaceForm,
    UpdateSpaceFormWithId,
};

/// Back-office catalogue and calendar. Only reachable by administrators.
pub struct AdminView {
    registry: AppRegistry,
}

impl AdminView {
    pub async fn open(registry: AppRegistry) -> AppResult<Self> {
        let user = signed_in_user(&registry).await?;
        if !user.is_admin() {
            tracing::warn!(user = %user.id, "non-admin tried to open the back office");
            return Err(AppError::ForbiddenOperation);
        }
        Ok(Self { registry })
    }

    pub async fn spaces(&self) -> AppResult<Vec<Space>> {
        self.registry
            .space_repository()
            .find_all(SpaceListOptions::default())
            .await
    }

    pub async fn create_space(&self, form: CreateSpaceForm) -> AppResult<Space> {
        form.validate()?;
        self.registry.space_repository().create(form.into()).await
    }

    pub async fn update_space(&self, space_id: SpaceId, form: UpdateSpaceForm) -> AppResult<Space> {
        form.validate()?;
        self.registry
            .space_repository()
            .update(UpdateSpaceFormWithId::new(space_id, form).into())
            .await
    }

    pub async fn delete_space(&self, space_id: SpaceId) -> AppResult<()> {
        self.registry
            .space_repository()
            .delete(DeleteSpace { space_id })
            .await
    }

    pub async fn pricing_rules(&self) -> AppResult<Vec<PricingRule>> {
        self.registry.pricing_rule_repository().find_all().await
    }

    pub async fn create_pricing_rule(&self, form: PricingRuleForm) -> AppResult<PricingRule> {
        validate_rate(&form)?;
        self.registry
            .pricing_rule_repository()
            .create(form.into())
            .await
    }

    pub async fn update_pricing_rule(
        &self,
        pricing_rule_id: PricingRuleId,
        form: PricingRuleForm,
    ) -> AppResult<PricingRule> {
        validate_rate(&form)?;
        self.registry
            .pricing_rule_repository()
            .update(PricingRuleFormWithId::new(pricing_rule_id, form).into())
            .await
    }

    pub async fn delete_pricing_rule(&self, pricing_rule_id: PricingRuleId) -> AppResult<()> {
        self.registry
            .pricing_rule_repository()
            .delete(pricing_rule_id)
            .await
    }

    pub async fn statuses(&self) -> AppResult<Vec<ReservationStatus>> {
        self.registry.reservation_status_repository().find_all().await
    }

    pub async fn create_status(&self, form: StatusForm) -> AppResult<ReservationStatus> {
        form.validate()?;
        self.registry
            .reservation_status_repository()
            .create(form.into())
            .await
    }

    pub async fn delete_status(&self, status_id: ReservationStatusId) -> AppResult<()> {
        self.registry
            .reservation_status_repository()
            .delete(status_id)
            .await
    }

    pub async fn reservations(&self) -> AppResult<Vec<Reservation>> {
        self.registry.reservation_repository().find_all().await
    }

    /// Calendar of every live reservation in the month containing `day`.
    pub async fn calendar(&self, day: NaiveDate) -> AppResult<Vec<CalendarEntry>> {
        let (first, last) = month_bounds(day)
            .ok_or_else(|| AppError::InvalidInput(format!("no month around {day}")))?;
        let in_month: Vec<Reservation> = self
            .reservations()
            .await?
            .into_iter()
            .filter(|r| first <= r.event_date && r.event_date <= last)
            .collect();
        Ok(reservation_entries(&in_month))
    }
}

fn validate_rate(form: &PricingRuleForm) -> AppResult<()> {
    form.validate()?;
    if form.hourly_rate.is_sign_negative() {
        return Err(AppError::InvalidInput(
            "the hourly rate cannot be negative".into(),
        ));
    }
    Ok(())
}
