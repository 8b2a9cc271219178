//! Database Module
//!
//! Embedded SurrealDB connection and schema seeding.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "ma";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(db).await
    }

    /// In-memory database, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Seed the approval status lookup. Ids 1 and 2 are fixed; further
        // statuses are appended through the API.
        db.query(
            "UPSERT status_approve:1 SET name = 'Pending';
             UPSERT status_approve:2 SET name = 'Approved';",
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to seed status lookup: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Failed to seed status lookup: {e}")))?;

        tracing::info!("Database ready (embedded SurrealDB)");
        Ok(Self { db })
    }
}
