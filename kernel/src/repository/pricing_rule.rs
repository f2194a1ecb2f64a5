use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::PricingRuleId,
    pricing::{
        event::{CreatePricingRule, UpdatePricingRule},
        PricingRule,
    },
};

#[async_trait]
pub trait PricingRuleRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<PricingRule>>;
    async fn create(&self, event: CreatePricingRule) -> AppResult<PricingRule>;
    async fn update(&self, event: UpdatePricingRule) -> AppResult<PricingRule>;
    async fn delete(&self, pricing_rule_id: PricingRuleId) -> AppResult<()>;
}
