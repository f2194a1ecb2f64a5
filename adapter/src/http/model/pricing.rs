use kernel::model::{
    id::{PricingRuleId, ReservationStatusId},
    pricing::{
        event::{CreatePricingRule, UpdatePricingRule},
        PricingRule,
    },
    reservation::ReservationStatus,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PricingRuleRow {
    pub uuid: PricingRuleId,
    pub name: String,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<PricingRuleRow> for PricingRule {
    fn from(value: PricingRuleRow) -> Self {
        let PricingRuleRow {
            uuid,
            name,
            hourly_rate,
            description,
        } = value;
        PricingRule {
            id: uuid,
            name,
            hourly_rate,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePricingRuleBody {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<CreatePricingRule> for CreatePricingRuleBody {
    fn from(value: CreatePricingRule) -> Self {
        let CreatePricingRule {
            name,
            hourly_rate,
            description,
        } = value;
        Self {
            name,
            hourly_rate,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatePricingRuleBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub hourly_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<UpdatePricingRule> for UpdatePricingRuleBody {
    fn from(value: UpdatePricingRule) -> Self {
        let UpdatePricingRule {
            pricing_rule_id: _,
            name,
            hourly_rate,
            description,
        } = value;
        Self {
            name,
            hourly_rate,
            description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRow {
    pub uuid: ReservationStatusId,
    pub name: String,
}

impl From<StatusRow> for ReservationStatus {
    fn from(value: StatusRow) -> Self {
        ReservationStatus {
            id: value.uuid,
            name: value.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateStatusBody {
    pub name: String,
}
