//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables.

pub mod repair_config;
pub mod status_approve;
pub mod technician;
pub mod user;
pub mod user_log;
pub mod workorder;

// Re-exports
pub use repair_config::RepairConfigRepository;
pub use status_approve::StatusApproveRepository;
pub use technician::TechnicianRepository;
pub use user::UserRepository;
pub use user_log::UserLogRepository;
pub use workorder::WorkorderRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID convention: clients may send either "table:key" or a bare key; the
// database always works with RecordId and responses render "table:key".
// =============================================================================

/// Strip a `table:` prefix when present, returning the bare key
pub fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(&format!("{table}:")[..]).unwrap_or(id)
}

/// Build a RecordId for `table` from a client-supplied id
pub fn rid(table: &str, id: &str) -> RecordId {
    RecordId::from_table_key(table, record_key(table, id))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
