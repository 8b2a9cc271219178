//! Repair Config Model
//!
//! A repair category ("electrical", "plumbing", …). Groups technicians and
//! categorizes workorder items.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::technician::TechnicianView;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub config_type: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConfigCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub config_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairConfigView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub config_type: String,
    pub created_at: String,
    /// Technicians of this category, present on single-config lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technicians: Option<Vec<TechnicianView>>,
}

impl From<RepairConfig> for RepairConfigView {
    fn from(c: RepairConfig) -> Self {
        Self {
            id: c.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            name: c.name,
            config_type: c.config_type,
            created_at: c.created_at,
            technicians: None,
        }
    }
}
