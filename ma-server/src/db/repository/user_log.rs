//! User Log Repository
//!
//! Append-only audit sink. A failed append is logged and swallowed so it can
//! never affect the operation being recorded.

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::BaseRepository;
use crate::db::models::UserLog;
use crate::utils::time;

const TABLE: &str = "user_log";

#[derive(Clone)]
pub struct UserLogRepository {
    base: BaseRepository,
}

impl UserLogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append an audit row; errors are logged, never returned
    pub async fn record(
        &self,
        user: Option<RecordId>,
        action: &str,
        description: impl Into<String>,
        metadata: Option<serde_json::Value>,
    ) {
        let log = UserLog {
            id: None,
            user,
            action: action.to_string(),
            description: description.into(),
            metadata,
            created_at: time::now_rfc3339(),
        };
        let result: Result<Option<UserLog>, surrealdb::Error> =
            self.base.db().create(TABLE).content(log).await;
        if let Err(e) = result {
            tracing::warn!(action = action, error = %e, "Failed to append user log");
        }
    }
}
