use rust_decimal::Decimal;

use crate::model::id::PricingRuleId;

#[derive(Debug, Clone, PartialEq)]
pub struct PricingRule {
    pub id: PricingRuleId,
    pub name: String,
    pub hourly_rate: Decimal,
    pub description: Option<String>,
}

pub mod event {
    use crate::model::id::PricingRuleId;
    use rust_decimal::Decimal;

    #[derive(Debug)]
    pub struct CreatePricingRule {
        pub name: String,
        pub hourly_rate: Decimal,
        pub description: Option<String>,
    }

    #[derive(Debug)]
    pub struct UpdatePricingRule {
        pub pricing_rule_id: PricingRuleId,
        pub name: Option<String>,
        pub hourly_rate: Option<Decimal>,
        pub description: Option<String>,
    }
}
