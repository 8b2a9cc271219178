//! Technician Repository

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult, record_key, rid};
use crate::db::models::{Technician, TechnicianCreate, TechnicianUpdate};
use crate::utils::time;

const TABLE: &str = "technician";

/// Filters of the technician list endpoint
#[derive(Debug, Default, Clone)]
pub struct TechnicianFilter {
    pub name: Option<String>,
    pub number: Option<String>,
    pub config_id: Option<String>,
}

#[derive(Clone)]
pub struct TechnicianRepository {
    base: BaseRepository,
}

impl TechnicianRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paginated listing with optional name/number/config filters
    pub async fn list(
        &self,
        filter: &TechnicianFilter,
        skip: i64,
        take: i64,
        sort_by: &str,
        ascending: bool,
    ) -> RepoResult<(Vec<Technician>, i64)> {
        let mut conditions = Vec::new();
        if filter.name.is_some() {
            conditions.push("string::contains(string::lowercase(name), string::lowercase($name))");
        }
        if filter.number.is_some() {
            conditions.push("string::contains(number, $number)");
        }
        if filter.config_id.is_some() {
            conditions.push("config = $config");
        }
        let where_sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order = sort_column(sort_by);
        let direction = if ascending { "ASC" } else { "DESC" };

        let sql = format!(
            "SELECT * FROM technician {where_sql} ORDER BY {order} {direction} LIMIT $take START $skip"
        );
        let count_sql = format!("SELECT count() FROM technician {where_sql} GROUP ALL");

        let config_bind = filter
            .config_id
            .as_deref()
            .map(|id| rid("config", id))
            .unwrap_or_else(|| RecordId::from_table_key("config", "none"));

        let mut result = self
            .base
            .db()
            .query(sql)
            .query(count_sql)
            .bind(("name", filter.name.clone().unwrap_or_default()))
            .bind(("number", filter.number.clone().unwrap_or_default()))
            .bind(("config", config_bind))
            .bind(("take", take))
            .bind(("skip", skip))
            .await?;
        let technicians: Vec<Technician> = result.take(0)?;
        let total: Option<i64> = result.take((1, "count"))?;
        Ok((technicians, total.unwrap_or(0)))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Technician>> {
        let technician: Option<Technician> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(technician)
    }

    /// Technicians of one repair category
    pub async fn find_by_config(&self, config: &RecordId) -> RepoResult<Vec<Technician>> {
        let technicians: Vec<Technician> = self
            .base
            .db()
            .query("SELECT * FROM technician WHERE config = $config ORDER BY name ASC")
            .bind(("config", config.clone()))
            .await?
            .take(0)?;
        Ok(technicians)
    }

    pub async fn create(&self, data: TechnicianCreate) -> RepoResult<Technician> {
        let technician = Technician {
            id: None,
            name: data.name,
            number: data.number,
            spare_number: data.spare_number,
            url: data.url,
            config: rid("config", &data.config_id),
            created_at: time::now_rfc3339(),
        };
        let key = Uuid::new_v4().simple().to_string();
        let created: Option<Technician> = self
            .base
            .db()
            .create((TABLE, key))
            .content(technician)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create technician".to_string()))
    }

    pub async fn update(&self, id: &str, data: TechnicianUpdate) -> RepoResult<Technician> {
        let key = record_key(TABLE, id);
        if self.find_by_id(key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Technician {id} not found")));
        }

        #[derive(Serialize)]
        struct TechnicianPatch {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            number: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            spare_number: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            url: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            config: Option<RecordId>,
        }

        let patch = TechnicianPatch {
            name: data.name,
            number: data.number,
            spare_number: data.spare_number,
            url: data.url,
            config: data.config_id.as_deref().map(|id| rid("config", id)),
        };

        let updated: Option<Technician> = self
            .base
            .db()
            .update((TABLE, key))
            .merge(patch)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Technician {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(TABLE, id);
        if self.find_by_id(key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Technician {id} not found")));
        }
        let _deleted: Option<Technician> = self.base.db().delete((TABLE, key)).await?;
        Ok(true)
    }
}

fn sort_column(sort_by: &str) -> &'static str {
    match sort_by {
        "name" => "name",
        "number" => "number",
        _ => "created_at",
    }
}
