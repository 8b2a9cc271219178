//! User Repository
//!
//! Read-side access to accounts managed by the auth service. `create` exists
//! for seeding and tests only; there is no HTTP surface for it.

use std::collections::HashSet;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{User, UserCreate};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY email ASC")
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(user)
    }

    /// Resolve which of the given ids belong to active users.
    ///
    /// Returns the matching ids in `table:key` form; callers diff against
    /// the input to find invalid or inactive references.
    pub async fn find_active_ids(&self, ids: &[RecordId]) -> RepoResult<HashSet<String>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM user WHERE active = true AND id IN $ids")
            .bind(("ids", ids.to_vec()))
            .await?
            .take(0)?;
        Ok(found.iter().map(ToString::to_string).collect())
    }

    /// Insert a user row directly (seeds and tests)
    pub async fn create(&self, id: &str, data: UserCreate) -> RepoResult<User> {
        let user = User {
            id: None,
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            active: data.active,
        };
        let created: Option<User> = self
            .base
            .db()
            .create((TABLE, record_key(TABLE, id)))
            .content(user)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
