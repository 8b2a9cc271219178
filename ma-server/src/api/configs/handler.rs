//! Config API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use shared::{ApiResponse, Paginated, Pagination};

use crate::api::{is_ascending, page_params};
use crate::core::ServerState;
use crate::db::models::{RepairConfigCreate, RepairConfigUpdate, RepairConfigView, TechnicianView};
use crate::db::repository::repair_config::ConfigFilter;
use crate::db::repository::{RepairConfigRepository, TechnicianRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Query params for listing configs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub config_type: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// GET /api/configs - 获取维修类别列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Paginated<RepairConfigView>>> {
    let repo = RepairConfigRepository::new(state.db.clone());
    let filter = ConfigFilter {
        name: query.name,
        config_type: query.config_type,
    };
    let (page, size, skip) = page_params(query.page, query.size);
    let (configs, total) = repo
        .list(
            &filter,
            skip,
            size,
            query.sort_by.as_deref().unwrap_or(""),
            is_ascending(query.sort_order.as_deref()),
        )
        .await?;

    Ok(Json(Paginated::new(
        configs.into_iter().map(RepairConfigView::from).collect(),
        Pagination::new(page, size, total),
    )))
}

/// GET /api/configs/types - 获取所有类别类型
pub async fn list_types(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let repo = RepairConfigRepository::new(state.db.clone());
    let types = repo.list_types().await?;
    Ok(Json(ApiResponse::ok(types)))
}

/// GET /api/configs/:id - 获取单个维修类别 (含技师)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<RepairConfigView>>> {
    let repo = RepairConfigRepository::new(state.db.clone());
    let config = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Config {id} not found")))?;

    let technicians = match &config.id {
        Some(config_id) => TechnicianRepository::new(state.db.clone())
            .find_by_config(config_id)
            .await?
            .into_iter()
            .map(TechnicianView::from)
            .collect(),
        None => Vec::new(),
    };

    let mut view = RepairConfigView::from(config);
    view.technicians = Some(technicians);
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/configs - 创建维修类别
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RepairConfigCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<RepairConfigView>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.config_type, "type", MAX_NAME_LEN)?;

    let repo = RepairConfigRepository::new(state.db.clone());
    let config = repo.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            config.into(),
            "Config created successfully",
        )),
    ))
}

/// PUT /api/configs/:id - 更新维修类别
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RepairConfigUpdate>,
) -> AppResult<Json<ApiResponse<RepairConfigView>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref config_type) = payload.config_type {
        validate_required_text(config_type, "type", MAX_NAME_LEN)?;
    }

    let repo = RepairConfigRepository::new(state.db.clone());
    let config = repo.update(&id, payload).await?;

    Ok(Json(ApiResponse::ok_with_message(
        config.into(),
        "Config updated successfully",
    )))
}

/// DELETE /api/configs/:id - 删除维修类别
///
/// 仍有技师挂靠的类别不可删除
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = RepairConfigRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        deleted,
        "Config deleted successfully",
    )))
}
