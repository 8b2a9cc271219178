//! Technician Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Technician {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    /// Primary contact number
    pub number: String,
    pub spare_number: Option<String>,
    /// Contact page / LINE profile URL
    pub url: Option<String>,
    pub config: RecordId,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianCreate {
    pub name: String,
    pub number: String,
    pub spare_number: Option<String>,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    pub config_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianUpdate {
    pub name: Option<String>,
    pub number: Option<String>,
    pub spare_number: Option<String>,
    #[validate(url(message = "url must be a valid URL"))]
    pub url: Option<String>,
    pub config_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianView {
    pub id: String,
    pub name: String,
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spare_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub config_id: String,
    /// Hydrated category, omitted when the config itself is the parent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<super::repair_config::RepairConfigView>,
    pub created_at: String,
}

impl From<Technician> for TechnicianView {
    fn from(t: Technician) -> Self {
        Self {
            id: t.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: t.name,
            number: t.number,
            spare_number: t.spare_number,
            url: t.url,
            config_id: t.config.to_string(),
            config: None,
            created_at: t.created_at,
        }
    }
}
