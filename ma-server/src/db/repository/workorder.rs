//! Workorder Repository
//!
//! Owns the aggregate: a workorder row, its items in submission order, and
//! their attachments. Items are only ever written together with their
//! parent; replacing the item list regenerates every item id.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::workorder::ConfigSummary;
use crate::db::models::{
    ApprovedItem, AttachmentRow, AttachmentView, RepairConfig, StatusApprove, User, ValidItem,
    Workorder, WorkorderItemRow, WorkorderItemView, WorkorderView,
};
use crate::db::repository::status_approve::StatusApproveRepository;
use crate::db::models::status_approve::PENDING_STATUS_ID;
use crate::utils::time;

const TABLE: &str = "workorder";
const ITEM_TABLE: &str = "workorder_item";

/// Filters of the workorder list endpoint
#[derive(Debug, Default, Clone)]
pub struct WorkorderFilter {
    pub title: Option<String>,
    pub status: Option<String>,
    /// Normalized RFC 3339 lower bound on item start dates
    pub start_date: Option<String>,
    /// Normalized RFC 3339 upper bound on item end dates
    pub end_date: Option<String>,
}

#[derive(Clone)]
pub struct WorkorderRepository {
    base: BaseRepository,
}

impl WorkorderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    // ------------------------------------------------------------------
    // Aggregate writes
    // ------------------------------------------------------------------

    /// Create the workorder with all items and attachments in one transaction
    pub async fn create_aggregate(
        &self,
        title: &str,
        status: &str,
        items: Vec<ValidItem>,
    ) -> RepoResult<WorkorderView> {
        let wo_key = Uuid::new_v4().simple().to_string();
        let wo_id = RecordId::from_table_key(TABLE, wo_key.as_str());
        let workorder = Workorder {
            id: None,
            title: title.to_string(),
            status: status.to_string(),
            created_at: time::now_rfc3339(),
        };
        let (item_rows, attachment_rows) = build_item_rows(&wo_id, items);

        let mut sql = String::from(
            "BEGIN TRANSACTION; \
             CREATE type::thing('workorder', $wo_key) CONTENT $wo; \
             INSERT INTO workorder_item $items; ",
        );
        if !attachment_rows.is_empty() {
            sql.push_str("INSERT INTO attachment $atts; ");
        }
        sql.push_str("COMMIT TRANSACTION;");

        self.base
            .db()
            .query(sql)
            .bind(("wo_key", wo_key.clone()))
            .bind(("wo", workorder))
            .bind(("items", item_rows))
            .bind(("atts", attachment_rows))
            .await?
            .check()?;

        self.find_view(&wo_key)
            .await?
            .ok_or_else(|| RepoError::Database("Created workorder vanished".to_string()))
    }

    /// Patch title/status and, when `items` is given, replace the whole
    /// item collection (previous item ids stop resolving).
    pub async fn update(
        &self,
        id: &str,
        title: Option<String>,
        status: Option<String>,
        items: Option<Vec<ValidItem>>,
    ) -> RepoResult<WorkorderView> {
        let key = record_key(TABLE, id);
        let existing: Option<Workorder> = self.base.db().select((TABLE, key)).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Workorder {id} not found")));
        }

        if title.is_some() || status.is_some() {
            #[derive(Serialize)]
            struct WorkorderPatch {
                #[serde(skip_serializing_if = "Option::is_none")]
                title: Option<String>,
                #[serde(skip_serializing_if = "Option::is_none")]
                status: Option<String>,
            }
            let _updated: Option<Workorder> = self
                .base
                .db()
                .update((TABLE, key))
                .merge(WorkorderPatch { title, status })
                .await?;
        }

        if let Some(items) = items {
            let wo_id = RecordId::from_table_key(TABLE, key);
            let (item_rows, attachment_rows) = build_item_rows(&wo_id, items);

            let mut sql = String::from(
                "BEGIN TRANSACTION; \
                 DELETE attachment WHERE item.workorder = $wo; \
                 DELETE workorder_item WHERE workorder = $wo; \
                 INSERT INTO workorder_item $items; ",
            );
            if !attachment_rows.is_empty() {
                sql.push_str("INSERT INTO attachment $atts; ");
            }
            sql.push_str("COMMIT TRANSACTION;");

            self.base
                .db()
                .query(sql)
                .bind(("wo", wo_id))
                .bind(("items", item_rows))
                .bind(("atts", attachment_rows))
                .await?
                .check()?;
        }

        self.find_view(key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Workorder {id} not found")))
    }

    /// Delete the workorder and cascade to items and attachments
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(TABLE, id);
        let existing: Option<Workorder> = self.base.db().select((TABLE, key)).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Workorder {id} not found")));
        }

        let wo_id = RecordId::from_table_key(TABLE, key);
        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 DELETE attachment WHERE item.workorder = $wo; \
                 DELETE workorder_item WHERE workorder = $wo; \
                 DELETE $wo; \
                 COMMIT TRANSACTION;",
            )
            .bind(("wo", wo_id))
            .await?
            .check()?;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Item status callback
    // ------------------------------------------------------------------

    pub async fn find_item(&self, id: &str) -> RepoResult<Option<WorkorderItemRow>> {
        let item: Option<WorkorderItemRow> = self
            .base
            .db()
            .select((ITEM_TABLE, record_key(ITEM_TABLE, id)))
            .await?;
        Ok(item)
    }

    /// Set the approval status of one item; overwrites the comment when
    /// provided. Re-applying the same status is a no-op in effect.
    pub async fn update_item_status(
        &self,
        id: &str,
        status: RecordId,
        comment: Option<String>,
    ) -> RepoResult<Option<WorkorderItemView>> {
        let key = record_key(ITEM_TABLE, id);
        if self.find_item(key).await?.is_none() {
            return Ok(None);
        }

        #[derive(Serialize)]
        struct ItemStatusPatch {
            status_approve: RecordId,
            #[serde(skip_serializing_if = "Option::is_none")]
            comment: Option<String>,
        }

        let updated: Option<WorkorderItemRow> = self
            .base
            .db()
            .update((ITEM_TABLE, key))
            .merge(ItemStatusPatch {
                status_approve: status,
                comment,
            })
            .await?;
        let row =
            updated.ok_or_else(|| RepoError::Database("Item update returned nothing".to_string()))?;

        let mut views = self.item_views(vec![row]).await?;
        Ok(views.pop())
    }

    /// All items currently in the given status, paired with their parent titles
    pub async fn items_in_status(&self, status: RecordId) -> RepoResult<Vec<ApprovedItem>> {
        let rows: Vec<WorkorderItemRow> = self
            .base
            .db()
            .query(
                "SELECT * FROM workorder_item WHERE status_approve = $status \
                 ORDER BY workorder ASC, sort_order ASC",
            )
            .bind(("status", status))
            .await?
            .take(0)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let wo_ids: Vec<RecordId> = dedupe(rows.iter().map(|r| r.workorder.clone()));
        let workorders: Vec<Workorder> = self
            .base
            .db()
            .query("SELECT * FROM workorder WHERE id IN $ids")
            .bind(("ids", wo_ids))
            .await?
            .take(0)?;
        let titles: HashMap<String, String> = workorders
            .into_iter()
            .filter_map(|w| w.id.as_ref().map(|id| (id.to_string(), w.title.clone())))
            .collect();

        let parents: Vec<String> = rows.iter().map(|r| r.workorder.to_string()).collect();
        let views = self.item_views(rows).await?;
        Ok(parents
            .into_iter()
            .zip(views)
            .map(|(parent, item)| ApprovedItem {
                workorder_title: titles.get(&parent).cloned().unwrap_or_default(),
                item,
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn find_view(&self, id: &str) -> RepoResult<Option<WorkorderView>> {
        let row: Option<Workorder> = self
            .base
            .db()
            .select((TABLE, record_key(TABLE, id)))
            .await?;
        let Some(row) = row else { return Ok(None) };
        let mut views = self.hydrate(vec![row]).await?;
        Ok(views.pop())
    }

    /// Filtered, sorted, paginated listing of hydrated aggregates
    pub async fn list(
        &self,
        filter: &WorkorderFilter,
        skip: i64,
        take: i64,
        sort_by: &str,
        ascending: bool,
    ) -> RepoResult<(Vec<WorkorderView>, i64)> {
        // Date bounds apply to items; pre-resolve the matching parents.
        let mut scoped: Option<Vec<RecordId>> = None;
        if filter.start_date.is_some() || filter.end_date.is_some() {
            let mut conditions = Vec::new();
            if filter.start_date.is_some() {
                conditions.push("start_date >= $from");
            }
            if filter.end_date.is_some() {
                conditions.push("end_date <= $to");
            }
            let sql = format!(
                "SELECT VALUE workorder FROM workorder_item WHERE {}",
                conditions.join(" AND ")
            );
            let parents: Vec<RecordId> = self
                .base
                .db()
                .query(sql)
                .bind(("from", filter.start_date.clone().unwrap_or_default()))
                .bind(("to", filter.end_date.clone().unwrap_or_default()))
                .await?
                .take(0)?;
            if parents.is_empty() {
                return Ok((Vec::new(), 0));
            }
            scoped = Some(dedupe(parents.into_iter()));
        }

        let mut conditions = Vec::new();
        if filter.title.is_some() {
            conditions
                .push("string::contains(string::lowercase(title), string::lowercase($title))");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if scoped.is_some() {
            conditions.push("id IN $scoped");
        }
        let where_sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let order = sort_column(sort_by);
        let direction = if ascending { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT * FROM workorder {where_sql} ORDER BY {order} {direction} LIMIT $take START $skip"
        );
        let count_sql = format!("SELECT count() FROM workorder {where_sql} GROUP ALL");

        let mut result = self
            .base
            .db()
            .query(sql)
            .query(count_sql)
            .bind(("title", filter.title.clone().unwrap_or_default()))
            .bind(("status", filter.status.clone().unwrap_or_default()))
            .bind(("scoped", scoped.unwrap_or_default()))
            .bind(("take", take))
            .bind(("skip", skip))
            .await?;
        let rows: Vec<Workorder> = result.take(0)?;
        let total: Option<i64> = result.take((1, "count"))?;

        let views = self.hydrate(rows).await?;
        Ok((views, total.unwrap_or(0)))
    }

    // ------------------------------------------------------------------
    // Hydration
    // ------------------------------------------------------------------

    async fn hydrate(&self, rows: Vec<Workorder>) -> RepoResult<Vec<WorkorderView>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let wo_ids: Vec<RecordId> = rows.iter().filter_map(|r| r.id.clone()).collect();
        let item_rows: Vec<WorkorderItemRow> = self
            .base
            .db()
            .query(
                "SELECT * FROM workorder_item WHERE workorder IN $ids \
                 ORDER BY sort_order ASC",
            )
            .bind(("ids", wo_ids))
            .await?
            .take(0)?;

        let parents: Vec<String> = item_rows.iter().map(|r| r.workorder.to_string()).collect();
        let item_views = self.item_views(item_rows).await?;

        let mut grouped: HashMap<String, Vec<WorkorderItemView>> = HashMap::new();
        for (parent, view) in parents.into_iter().zip(item_views) {
            grouped.entry(parent).or_default().push(view);
        }

        Ok(rows
            .into_iter()
            .map(|w| {
                let id = w.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                let workorder_items = grouped.remove(&id).unwrap_or_default();
                WorkorderView {
                    id,
                    title: w.title,
                    status: w.status,
                    created_at: w.created_at,
                    workorder_items,
                }
            })
            .collect())
    }

    /// Resolve item rows into client-facing views (users, configs, statuses,
    /// attachments fetched in bulk). Output order matches input order.
    async fn item_views(&self, rows: Vec<WorkorderItemRow>) -> RepoResult<Vec<WorkorderItemView>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let item_ids: Vec<RecordId> = rows.iter().filter_map(|r| r.id.clone()).collect();
        let user_ids: Vec<RecordId> = dedupe(
            rows.iter()
                .flat_map(|r| [r.owner.clone(), r.approver.clone()])
                .flatten(),
        );
        let config_ids: Vec<RecordId> = dedupe(rows.iter().map(|r| r.config.clone()));
        let status_ids: Vec<RecordId> = dedupe(rows.iter().map(|r| r.status_approve.clone()));

        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE id IN $user_ids")
            .query("SELECT * FROM config WHERE id IN $config_ids")
            .query("SELECT * FROM status_approve WHERE id IN $status_ids")
            .query("SELECT * FROM attachment WHERE item IN $item_ids")
            .bind(("user_ids", user_ids))
            .bind(("config_ids", config_ids))
            .bind(("status_ids", status_ids))
            .bind(("item_ids", item_ids))
            .await?;
        let users: Vec<User> = result.take(0)?;
        let configs: Vec<RepairConfig> = result.take(1)?;
        let statuses: Vec<StatusApprove> = result.take(2)?;
        let attachments: Vec<AttachmentRow> = result.take(3)?;

        let users: HashMap<String, User> = users
            .into_iter()
            .filter_map(|u| u.id.as_ref().map(|id| (id.to_string(), u.clone())))
            .collect();
        let configs: HashMap<String, RepairConfig> = configs
            .into_iter()
            .filter_map(|c| c.id.as_ref().map(|id| (id.to_string(), c.clone())))
            .collect();
        let status_names: HashMap<String, String> = statuses
            .into_iter()
            .filter_map(|s| s.id.as_ref().map(|id| (id.to_string(), s.name.clone())))
            .collect();
        let mut files: HashMap<String, Vec<AttachmentView>> = HashMap::new();
        for a in attachments {
            files.entry(a.item.to_string()).or_default().push(AttachmentView {
                id: a.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
                url: a.url,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                let status_approve_id = row
                    .status_approve
                    .key()
                    .to_string()
                    .parse()
                    .unwrap_or_default();
                WorkorderItemView {
                    attachments: files.remove(&id).unwrap_or_default(),
                    config: configs.get(&row.config.to_string()).map(|c| ConfigSummary {
                        id: row.config.to_string(),
                        name: c.name.clone(),
                        config_type: c.config_type.clone(),
                    }),
                    owner: row
                        .owner
                        .as_ref()
                        .and_then(|o| users.get(&o.to_string()))
                        .map(User::summary),
                    approver: row
                        .approver
                        .as_ref()
                        .and_then(|a| users.get(&a.to_string()))
                        .map(User::summary),
                    status_approve: status_names.get(&row.status_approve.to_string()).cloned(),
                    status_approve_id,
                    id,
                    detail: row.detail,
                    start_date: row.start_date,
                    end_date: row.end_date,
                    comment: row.comment,
                }
            })
            .collect())
    }
}

/// Pre-generate item/attachment rows with fresh record ids
fn build_item_rows(
    wo_id: &RecordId,
    items: Vec<ValidItem>,
) -> (Vec<WorkorderItemRow>, Vec<AttachmentRow>) {
    let mut item_rows = Vec::with_capacity(items.len());
    let mut attachment_rows = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        let item_id = RecordId::from_table_key(
            ITEM_TABLE,
            Uuid::new_v4().simple().to_string(),
        );
        for url in &item.attachments {
            attachment_rows.push(AttachmentRow {
                id: None,
                item: item_id.clone(),
                url: url.clone(),
            });
        }
        item_rows.push(WorkorderItemRow {
            id: Some(item_id),
            workorder: wo_id.clone(),
            config: item.config,
            detail: item.detail,
            start_date: item.start_date,
            end_date: item.end_date,
            owner: Some(item.owner),
            approver: Some(item.approver),
            status_approve: StatusApproveRepository::record_id(PENDING_STATUS_ID),
            comment: item.comment,
            sort_order: index as i64,
        });
    }
    (item_rows, attachment_rows)
}

fn sort_column(sort_by: &str) -> &'static str {
    match sort_by {
        "title" => "title",
        "status" => "status",
        _ => "created_at",
    }
}

fn dedupe(ids: impl Iterator<Item = RecordId>) -> Vec<RecordId> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        if seen.insert(id.to_string()) {
            out.push(id);
        }
    }
    out
}
