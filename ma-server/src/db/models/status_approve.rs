//! Status Approve Model
//!
//! Lookup table of approval states. Rows carry integer record keys;
//! 1 = Pending and 2 = Approved are seeded at startup.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Record key of the default status assigned to new items
pub const PENDING_STATUS_ID: i64 = 1;
/// Record key of the approved status summarized by the repair reminder
pub const APPROVED_STATUS_ID: i64 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusApprove {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
}

impl StatusApprove {
    /// Integer key of the row, 0 when the id is missing or non-numeric
    pub fn code(&self) -> i64 {
        self.id
            .as_ref()
            .and_then(|id| id.key().to_string().parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusApproveCreate {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusApproveView {
    pub id: i64,
    pub name: String,
}

impl From<StatusApprove> for StatusApproveView {
    fn from(s: StatusApprove) -> Self {
        let id = s.code();
        Self { id, name: s.name }
    }
}
