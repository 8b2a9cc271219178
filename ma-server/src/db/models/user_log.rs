//! User Log Model
//!
//! Append-only audit record. Write-only from this core; failures to append
//! never affect the primary operation.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: Option<RecordId>,
    pub action: String,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}
