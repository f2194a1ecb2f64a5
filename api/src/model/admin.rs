use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{PricingRuleId, SpaceId, SpaceStatusId, SpaceTypeId},
    pricing::event::{CreatePricingRule, UpdatePricingRule},
    reservation::event::CreateReservationStatus,
    space::event::{CreateSpace, UpdateSpace},
};
use rust_decimal::Decimal;

#[derive(Debug, Validate)]
pub struct CreateSpaceForm {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(skip)]
    pub description: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    pub space_type_id: SpaceTypeId,
    #[garde(skip)]
    pub status_id: Option<SpaceStatusId>,
    #[garde(skip)]
    pub pricing_rule_id: PricingRuleId,
    #[garde(skip)]
    pub is_active: bool,
}

impl From<CreateSpaceForm> for CreateSpace {
    fn from(value: CreateSpaceForm) -> Self {
        let CreateSpaceForm {
            name,
            description,
            capacity,
            space_type_id,
            status_id,
            pricing_rule_id,
            is_active,
        } = value;
        CreateSpace {
            name,
            description,
            capacity,
            space_type_id,
            status_id,
            pricing_rule_id,
            is_active,
        }
    }
}

#[derive(Debug, Default, Validate)]
pub struct UpdateSpaceForm {
    #[garde(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub space_type_id: Option<SpaceTypeId>,
    #[garde(skip)]
    pub status_id: Option<SpaceStatusId>,
    #[garde(skip)]
    pub pricing_rule_id: Option<PricingRuleId>,
    #[garde(skip)]
    pub is_active: Option<bool>,
}

#[derive(new)]
pub struct UpdateSpaceFormWithId(SpaceId, UpdateSpaceForm);

impl From<UpdateSpaceFormWithId> for UpdateSpace {
    fn from(value: UpdateSpaceFormWithId) -> Self {
        let UpdateSpaceFormWithId(
            space_id,
            UpdateSpaceForm {
                name,
                description,
                capacity,
                space_type_id,
                status_id,
                pricing_rule_id,
                is_active,
            },
        ) = value;
        UpdateSpace {
            space_id,
            name,
            description,
            capacity,
            space_type_id,
            status_id,
            pricing_rule_id,
            is_active,
        }
    }
}

#[derive(Debug, Validate)]
pub struct PricingRuleForm {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    // checked by the handler; garde has no ordering rule for decimals
    #[garde(skip)]
    pub hourly_rate: Decimal,
    #[garde(skip)]
    pub description: Option<String>,
}

impl From<PricingRuleForm> for CreatePricingRule {
    fn from(value: PricingRuleForm) -> Self {
        let PricingRuleForm {
            name,
            hourly_rate,
            description,
        } = value;
        CreatePricingRule {
            name,
            hourly_rate,
            description,
        }
    }
}

#[derive(new)]
pub struct PricingRuleFormWithId(PricingRuleId, PricingRuleForm);

impl From<PricingRuleFormWithId> for UpdatePricingRule {
    fn from(value: PricingRuleFormWithId) -> Self {
        let PricingRuleFormWithId(
            pricing_rule_id,
            PricingRuleForm {
                name,
                hourly_rate,
                description,
            },
        ) = value;
        UpdatePricingRule {
            pricing_rule_id,
            name: Some(name),
            hourly_rate: Some(hourly_rate),
            description,
        }
    }
}

#[derive(Debug, Validate)]
pub struct StatusForm {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
}

impl From<StatusForm> for CreateReservationStatus {
    fn from(value: StatusForm) -> Self {
        CreateReservationStatus { name: value.name }
    }
}
