//! User Model
//!
//! Accounts are owned by the auth service; this core reads them to resolve
//! workorder owners/approvers and only inserts rows from seeds and tests.

use serde::{Deserialize, Serialize};
use shared::models::UserSummary;
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: bool,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub active: bool,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            active: u.active,
        }
    }
}
