//! Approval service wire types
//!
//! One request is issued per workorder item that has both an owner and an
//! approver. The external system decides, then calls `callbackUrl` to
//! report the new status.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    /// Repair category name shown to the approver
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Endpoint the approval system invokes to update the item status
    pub callback_url: String,
    pub approver_id: String,
    pub owner_id: String,
}
