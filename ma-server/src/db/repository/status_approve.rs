//! Status Approve Repository
//!
//! Integer-keyed lookup rows. 1 = Pending, 2 = Approved (seeded at startup).

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{StatusApprove, StatusApproveCreate};

const TABLE: &str = "status_approve";

#[derive(Clone)]
pub struct StatusApproveRepository {
    base: BaseRepository,
}

impl StatusApproveRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<StatusApprove>> {
        let statuses: Vec<StatusApprove> = self
            .base
            .db()
            .query("SELECT * FROM status_approve ORDER BY id ASC")
            .await?
            .take(0)?;
        Ok(statuses)
    }

    pub async fn find_by_code(&self, code: i64) -> RepoResult<Option<StatusApprove>> {
        let status: Option<StatusApprove> = self.base.db().select((TABLE, code)).await?;
        Ok(status)
    }

    /// Append a new status under the next free integer key
    pub async fn create(&self, data: StatusApproveCreate) -> RepoResult<StatusApprove> {
        let next = self
            .find_all()
            .await?
            .iter()
            .map(StatusApprove::code)
            .max()
            .unwrap_or(0)
            + 1;

        let status = StatusApprove {
            id: None,
            name: data.name,
        };
        let created: Option<StatusApprove> = self
            .base
            .db()
            .create((TABLE, next))
            .content(status)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create status".to_string()))
    }

    pub fn record_id(code: i64) -> RecordId {
        RecordId::from_table_key(TABLE, code)
    }
}
