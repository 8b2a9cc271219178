//! Workorder Aggregate Models
//!
//! A workorder owns an ordered list of items; each item carries its repair
//! category, owner, approver, approval status and attachments. Items and
//! attachments are always written together with their parent.

use serde::{Deserialize, Serialize};
use shared::models::UserSummary;
use surrealdb::RecordId;

/// Status a workorder starts in unless the client says otherwise
pub const DEFAULT_WORKORDER_STATUS: &str = "PENDING";

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workorder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkorderItemRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub workorder: RecordId,
    pub config: RecordId,
    pub detail: String,
    pub start_date: String,
    pub end_date: String,
    pub owner: Option<RecordId>,
    pub approver: Option<RecordId>,
    pub status_approve: RecordId,
    pub comment: Option<String>,
    /// Preserves submission order within the parent workorder
    pub sort_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub item: RecordId,
    pub url: String,
}

// =============================================================================
// API request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkorderCreate {
    pub title: String,
    pub status: Option<String>,
    #[serde(default)]
    pub workorder_items: Vec<WorkorderItemInput>,
}

/// One submitted item. Every field is optional at the serde level so the
/// guard can report all missing fields of a batch at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkorderItemInput {
    pub detail: Option<String>,
    pub config_id: Option<String>,
    pub owner_id: Option<String>,
    pub approver_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkorderUpdate {
    pub title: Option<String>,
    pub status: Option<String>,
    /// When present, the whole item collection is replaced
    pub workorder_items: Option<Vec<WorkorderItemInput>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatusUpdate {
    pub status_approve_id: i64,
    pub comment: Option<String>,
}

/// An item that passed the pre-write guard: required fields present,
/// references resolved to record ids, dates normalized.
#[derive(Debug, Clone)]
pub struct ValidItem {
    pub detail: String,
    pub config: RecordId,
    pub owner: RecordId,
    pub approver: RecordId,
    pub start_date: String,
    pub end_date: String,
    pub comment: Option<String>,
    pub attachments: Vec<String>,
}

// =============================================================================
// Hydrated views
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub config_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentView {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkorderItemView {
    pub id: String,
    pub detail: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver: Option<UserSummary>,
    pub status_approve_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_approve: Option<String>,
    pub attachments: Vec<AttachmentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkorderView {
    pub id: String,
    pub title: String,
    pub status: String,
    pub created_at: String,
    pub workorder_items: Vec<WorkorderItemView>,
}

/// An approved item paired with its parent's title, for the repair reminder
#[derive(Debug, Clone)]
pub struct ApprovedItem {
    pub workorder_title: String,
    pub item: WorkorderItemView,
}
