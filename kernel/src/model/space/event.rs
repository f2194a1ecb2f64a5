use crate::model::id::{PricingRuleId, SpaceId, SpaceStatusId, SpaceTypeId};

#[derive(Debug)]
pub struct CreateSpace {
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub space_type_id: SpaceTypeId,
    pub status_id: Option<SpaceStatusId>,
    pub pricing_rule_id: PricingRuleId,
    pub is_active: bool,
}

#[derive(Debug)]
pub struct UpdateSpace {
    pub space_id: SpaceId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub space_type_id: Option<SpaceTypeId>,
    pub status_id: Option<SpaceStatusId>,
    pub pricing_rule_id: Option<PricingRuleId>,
    pub is_active: Option<bool>,
}

#[derive(Debug)]
pub struct DeleteSpace {
    pub space_id: SpaceId,
}
