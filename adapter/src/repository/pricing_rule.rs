use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::PricingRuleId,
    pricing::{
        event::{CreatePricingRule, UpdatePricingRule},
        PricingRule,
    },
};
use kernel::repository::pricing_rule::PricingRuleRepository;
use shared::error::AppResult;

use crate::http::{
    model::pricing::{CreatePricingRuleBody, PricingRuleRow, UpdatePricingRuleBody},
    ApiClient,
};

const PRICING_RULES: &str = "/api/v1/admin/pricing-rules";

#[derive(new)]
pub struct PricingRuleRepositoryImpl {
    client: ApiClient,
}

#[async_trait]
impl PricingRuleRepository for PricingRuleRepositoryImpl {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> AppResult<Vec<PricingRule>> {
        let rows: Vec<PricingRuleRow> = self.client.get_list(PRICING_RULES, &[]).await?;
        Ok(rows.into_iter().map(PricingRule::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, event: CreatePricingRule) -> AppResult<PricingRule> {
        self.client
            .post_data::<_, PricingRuleRow>(PRICING_RULES, &CreatePricingRuleBody::from(event))
            .await
            .map(PricingRule::from)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, event: UpdatePricingRule) -> AppResult<PricingRule> {
        let path = format!("{PRICING_RULES}/{}", event.pricing_rule_id);
        self.client
            .put_data::<_, PricingRuleRow>(&path, &UpdatePricingRuleBody::from(event))
            .await
            .map(PricingRule::from)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, pricing_rule_id: PricingRuleId) -> AppResult<()> {
        self.client
            .delete(&format!("{PRICING_RULES}/{pricing_rule_id}"))
            .await
    }
}
