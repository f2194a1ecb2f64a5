use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{
    id::{PricingRuleId, SpaceId, SpaceStatusId, SpaceTypeId},
    pricing::PricingRule,
};

pub mod event;

#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub space_type_id: Option<SpaceTypeId>,
    pub status_id: Option<SpaceStatusId>,
    pub pricing_rule_id: Option<PricingRuleId>,
    pub is_active: bool,
    pub images: Vec<String>,
    pub space_type: Option<SpaceType>,
    pub status: Option<SpaceStatus>,
    pub pricing_rule: Option<PricingRule>,
    pub availability_status: Option<String>,
}

impl Space {
    /// Hourly rate of the attached pricing rule, or `fallback` when the
    /// space has none.
    pub fn hourly_rate_or(&self, fallback: Decimal) -> Decimal {
        self.pricing_rule
            .as_ref()
            .map(|rule| rule.hourly_rate)
            .filter(|rate| !rate.is_zero())
            .unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceType {
    pub id: SpaceTypeId,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceStatus {
    pub id: SpaceStatusId,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SpaceListOptions {
    pub capacity: Option<i32>,
    pub space_type_id: Option<SpaceTypeId>,
    pub desired_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
