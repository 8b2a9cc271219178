//! Workorder API Handlers
//!
//! The write path runs guard → transactional write → best-effort side
//! effects (approval dispatch, group chat notification, audit log). The
//! stored workorder is the source of truth: a failed outbound call is
//! logged and never fails the request that persisted it.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use shared::{ApiResponse, Paginated, Pagination};

use super::validate::validate_items;
use crate::api::{is_ascending, page_params};
use crate::core::ServerState;
use crate::db::models::workorder::DEFAULT_WORKORDER_STATUS;
use crate::db::models::{
    ItemStatusUpdate, WorkorderCreate, WorkorderItemView, WorkorderUpdate, WorkorderView,
};
use crate::db::repository::workorder::WorkorderFilter;
use crate::db::repository::{StatusApproveRepository, UserLogRepository, WorkorderRepository};
use crate::services::{approval, notify};
use crate::utils::validation::{MAX_TITLE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, time};

/// Query params for listing workorders
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub title: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// GET /api/workorders - 获取工单列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Paginated<WorkorderView>>> {
    let filter = WorkorderFilter {
        title: query.title,
        status: query.status,
        start_date: normalize_filter_date(query.start_date.as_deref(), "startDate")?,
        end_date: normalize_filter_date(query.end_date.as_deref(), "endDate")?,
    };
    let (page, size, skip) = page_params(query.page, query.size);

    let repo = WorkorderRepository::new(state.db.clone());
    let (views, total) = repo
        .list(
            &filter,
            skip,
            size,
            query.sort_by.as_deref().unwrap_or(""),
            is_ascending(query.sort_order.as_deref()),
        )
        .await?;

    Ok(Json(Paginated::new(views, Pagination::new(page, size, total))))
}

/// GET /api/workorders/:id - 获取单个工单 (完整聚合)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<WorkorderView>>> {
    let repo = WorkorderRepository::new(state.db.clone());
    let view = repo
        .find_view(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Workorder {id} not found")))?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/workorders - 创建工单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<WorkorderCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<WorkorderView>>)> {
    validate_required_text(&payload.title, "title", MAX_TITLE_LEN)?;
    let items = validate_items(&state, &payload.workorder_items).await?;

    let repo = WorkorderRepository::new(state.db.clone());
    let view = repo
        .create_aggregate(
            &payload.title,
            payload.status.as_deref().unwrap_or(DEFAULT_WORKORDER_STATUS),
            items,
        )
        .await?;

    // 写入已提交，后续都是尽力而为的副作用
    dispatch_and_notify(&state, &view, true).await;
    UserLogRepository::new(state.db.clone())
        .record(
            None,
            "WORKORDER_CREATE",
            format!(
                "Created workorder {} with {} item(s)",
                view.id,
                view.workorder_items.len()
            ),
            None,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            view,
            "Workorder created successfully",
        )),
    ))
}

/// PUT /api/workorders/:id - 更新工单
///
/// 携带 workorderItems 时整体替换条目集合 (旧条目 id 全部失效)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<WorkorderUpdate>,
) -> AppResult<Json<ApiResponse<WorkorderView>>> {
    if let Some(ref title) = payload.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    let items = match &payload.workorder_items {
        Some(inputs) => Some(validate_items(&state, inputs).await?),
        None => None,
    };
    let replaced = items.is_some();

    let repo = WorkorderRepository::new(state.db.clone());
    let view = repo
        .update(&id, payload.title, payload.status, items)
        .await?;

    // Replaced items are fresh pending rows; hand them to the approval
    // system like newly created ones. No chat announcement on update.
    if replaced {
        dispatch_and_notify(&state, &view, false).await;
    }
    UserLogRepository::new(state.db.clone())
        .record(
            None,
            "WORKORDER_UPDATE",
            format!("Updated workorder {}", view.id),
            None,
        )
        .await;

    Ok(Json(ApiResponse::ok_with_message(
        view,
        "Workorder updated successfully",
    )))
}

/// DELETE /api/workorders/:id - 删除工单 (级联条目与附件)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = WorkorderRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;

    UserLogRepository::new(state.db.clone())
        .record(
            None,
            "WORKORDER_DELETE",
            format!("Deleted workorder {id}"),
            None,
        )
        .await;

    Ok(Json(ApiResponse::ok_with_message(
        deleted,
        "Workorder deleted successfully",
    )))
}

/// PUT /api/workorders/items/:id/status - 审批系统回调
///
/// 幂等：重复送达同一状态等价于一次。不做归属校验。
pub async fn update_item_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemStatusUpdate>,
) -> AppResult<Json<ApiResponse<WorkorderItemView>>> {
    let status_repo = StatusApproveRepository::new(state.db.clone());
    let status = status_repo
        .find_by_code(payload.status_approve_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Status approve {} not found",
                payload.status_approve_id
            ))
        })?;
    let status_id = status
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Status row without id"))?;

    let repo = WorkorderRepository::new(state.db.clone());
    let view = repo
        .update_item_status(&id, status_id, payload.comment)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Workorder item {id} not found")))?;

    Ok(Json(ApiResponse::ok_with_message(
        view,
        "Workorder item status updated",
    )))
}

/// Run the post-commit side effects; failures are logged, never returned.
async fn dispatch_and_notify(state: &ServerState, view: &WorkorderView, announce: bool) {
    if let Err(e) = approval::dispatch_approvals(
        state.approval.as_ref(),
        view,
        &state.config.public_base_url,
    )
    .await
    {
        tracing::warn!(workorder = %view.id, error = %e, "Approval dispatch incomplete");
    }
    if announce
        && let Err(e) = notify::notify_created(state.chat.as_ref(), view).await
    {
        tracing::warn!(workorder = %view.id, error = %e, "Chat notification failed");
    }
}

fn normalize_filter_date(value: Option<&str>, field: &str) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => time::normalize_date(raw)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Invalid {field}"))),
    }
}
