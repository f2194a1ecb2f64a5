use kernel::model::{
    id::{PricingRuleId, SpaceId, SpaceStatusId, SpaceTypeId},
    space::{
        event::{CreateSpace, UpdateSpace},
        Space, SpaceListOptions, SpaceStatus, SpaceType,
    },
};
use serde::{Deserialize, Serialize};

use super::pricing::PricingRuleRow;

#[derive(Debug, Deserialize)]
pub struct SpaceRow {
    pub uuid: SpaceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub spaces_type_id: Option<SpaceTypeId>,
    #[serde(default)]
    pub status_id: Option<SpaceStatusId>,
    #[serde(default)]
    pub pricing_rule_id: Option<PricingRuleId>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default, rename = "type")]
    pub space_type: Option<SpaceTypeRow>,
    #[serde(default)]
    pub status: Option<SpaceStatusRow>,
    #[serde(default)]
    pub pricing_rule: Option<PricingRuleRow>,
    #[serde(default)]
    pub availability_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpaceTypeRow {
    pub uuid: SpaceTypeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpaceStatusRow {
    pub uuid: SpaceStatusId,
    pub name: String,
}

impl From<SpaceRow> for Space {
    fn from(value: SpaceRow) -> Self {
        let SpaceRow {
            uuid,
            name,
            description,
            capacity,
            spaces_type_id,
            status_id,
            pricing_rule_id,
            is_active,
            images,
            space_type,
            status,
            pricing_rule,
            availability_status,
        } = value;
        Space {
            id: uuid,
            name,
            description: description.unwrap_or_default(),
            capacity: capacity.unwrap_or_default(),
            space_type_id: spaces_type_id.or(space_type.as_ref().map(|t| t.uuid)),
            status_id: status_id.or(status.as_ref().map(|s| s.uuid)),
            pricing_rule_id: pricing_rule_id.or(pricing_rule.as_ref().map(|r| r.uuid)),
            is_active: is_active.unwrap_or(true),
            images: images.unwrap_or_default(),
            space_type: space_type.map(|t| SpaceType {
                id: t.uuid,
                name: t.name,
                description: t.description,
            }),
            status: status.map(|s| SpaceStatus {
                id: s.uuid,
                name: s.name,
            }),
            pricing_rule: pricing_rule.map(Into::into),
            availability_status,
        }
    }
}

/// Query string for the catalogue; unset filters are left out entirely.
pub fn list_query(options: &SpaceListOptions) -> Vec<(&'static str, String)> {
    let SpaceListOptions {
        capacity,
        space_type_id,
        desired_date,
        page,
        per_page,
    } = options;
    [
        ("capacity", capacity.filter(|c| *c > 0).map(|c| c.to_string())),
        ("spaces_type_id", space_type_id.map(|id| id.to_string())),
        ("fecha_deseada", desired_date.map(|d| d.format("%Y-%m-%d").to_string())),
        ("page", page.map(|p| p.to_string())),
        ("per_page", per_page.map(|p| p.to_string())),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key, v)))
    .collect()
}

#[derive(Debug, Serialize)]
pub struct CreateSpaceBody {
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub spaces_type_id: SpaceTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<SpaceStatusId>,
    pub pricing_rule_id: PricingRuleId,
    pub is_active: bool,
}

impl From<CreateSpace> for CreateSpaceBody {
    fn from(value: CreateSpace) -> Self {
        let CreateSpace {
            name,
            description,
            capacity,
            space_type_id,
            status_id,
            pricing_rule_id,
            is_active,
        } = value;
        Self {
            name,
            description,
            capacity,
            spaces_type_id: space_type_id,
            status_id,
            pricing_rule_id,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateSpaceBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spaces_type_id: Option<SpaceTypeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<SpaceStatusId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_rule_id: Option<PricingRuleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<UpdateSpace> for UpdateSpaceBody {
    fn from(value: UpdateSpace) -> Self {
        let UpdateSpace {
            space_id: _,
            name,
            description,
            capacity,
            space_type_id,
            status_id,
            pricing_rule_id,
            is_active,
        } = value;
        Self {
            name,
            description,
            capacity,
            spaces_type_id: space_type_id,
            status_id,
            pricing_rule_id,
            is_active,
        }
    }
}
