//! Repair Config Repository

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{RepairConfig, RepairConfigCreate, RepairConfigUpdate};
use crate::utils::time;

const TABLE: &str = "config";

/// Filters of the config list endpoint
#[derive(Debug, Default, Clone)]
pub struct ConfigFilter {
    pub name: Option<String>,
    pub config_type: Option<String>,
}

#[derive(Clone)]
pub struct RepairConfigRepository {
    base: BaseRepository,
}

impl RepairConfigRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paginated listing with optional name/type filters
    pub async fn list(
        &self,
        filter: &ConfigFilter,
        skip: i64,
        take: i64,
        sort_by: &str,
        ascending: bool,
    ) -> RepoResult<(Vec<RepairConfig>, i64)> {
        let mut conditions = Vec::new();
        if filter.name.is_some() {
            conditions.push("string::contains(string::lowercase(name), string::lowercase($name))");
        }
        if filter.config_type.is_some() {
            conditions.push("config_type = $config_type");
        }
        let where_sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Sort field is whitelisted, never client input
        let order = sort_column(sort_by);
        let direction = if ascending { "ASC" } else { "DESC" };

        let sql = format!(
            "SELECT * FROM config {where_sql} ORDER BY {order} {direction} LIMIT $take START $skip"
        );
        let count_sql = format!("SELECT count() FROM config {where_sql} GROUP ALL");

        let mut result = self
            .base
            .db()
            .query(sql)
            .query(count_sql)
            .bind(("name", filter.name.clone().unwrap_or_default()))
            .bind(("config_type", filter.config_type.clone().unwrap_or_default()))
            .bind(("take", take))
            .bind(("skip", skip))
            .await?;
        let configs: Vec<RepairConfig> = result.take(0)?;
        let total: Option<i64> = result.take((1, "count"))?;
        Ok((configs, total.unwrap_or(0)))
    }

    /// Distinct category type names
    pub async fn list_types(&self) -> RepoResult<Vec<String>> {
        let mut types: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE config_type FROM config")
            .await?
            .take(0)?;
        types.sort();
        types.dedup();
        Ok(types)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RepairConfig>> {
        let config: Option<RepairConfig> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(config)
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<RepairConfig>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM config WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let configs: Vec<RepairConfig> = result.take(0)?;
        Ok(configs.into_iter().next())
    }

    /// Bulk fetch for hydrating references
    pub async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<RepairConfig>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let configs: Vec<RepairConfig> = self
            .base
            .db()
            .query("SELECT * FROM config WHERE id IN $ids")
            .bind(("ids", ids.to_vec()))
            .await?
            .take(0)?;
        Ok(configs)
    }

    /// Resolve which of the given config ids exist
    pub async fn existing_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<RecordId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found: Vec<RecordId> = self
            .base
            .db()
            .query("SELECT VALUE id FROM config WHERE id IN $ids")
            .bind(("ids", ids.to_vec()))
            .await?
            .take(0)?;
        Ok(found)
    }

    pub async fn create(&self, data: RepairConfigCreate) -> RepoResult<RepairConfig> {
        // Check duplicate name
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Config '{}' already exists",
                data.name
            )));
        }

        let config = RepairConfig {
            id: None,
            name: data.name,
            config_type: data.config_type,
            created_at: time::now_rfc3339(),
        };
        let key = Uuid::new_v4().simple().to_string();
        let created: Option<RepairConfig> = self
            .base
            .db()
            .create((TABLE, key))
            .content(config)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create config".to_string()))
    }

    pub async fn update(&self, id: &str, data: RepairConfigUpdate) -> RepoResult<RepairConfig> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Config {id} not found")))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Config '{new_name}' already exists"
            )));
        }

        #[derive(Serialize)]
        struct ConfigPatch {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            config_type: Option<String>,
        }

        let patch = ConfigPatch {
            name: data.name,
            config_type: data.config_type,
        };

        let key = record_key(TABLE, id);
        let updated: Option<RepairConfig> = self
            .base
            .db()
            .update((TABLE, key))
            .merge(patch)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Config {id} not found")))
    }

    /// Delete a config; refused while technicians still reference it
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(TABLE, id);
        let existing = self.find_by_id(key).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Config {id} not found")));
        }

        let config_id = RecordId::from_table_key(TABLE, key);
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM technician WHERE config = $config GROUP ALL")
            .bind(("config", config_id.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Duplicate(
                "Cannot delete config with assigned technicians".to_string(),
            ));
        }

        let _deleted: Option<RepairConfig> = self.base.db().delete((TABLE, key)).await?;
        Ok(true)
    }
}

/// Map a client sort key onto a real column; unknown keys fall back to creation time
pub(crate) fn sort_column(sort_by: &str) -> &'static str {
    match sort_by {
        "name" => "name",
        "type" => "config_type",
        _ => "created_at",
    }
}
