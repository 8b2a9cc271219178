//! Technician API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use shared::{ApiResponse, Paginated, Pagination};

use crate::api::{is_ascending, page_params};
use crate::core::ServerState;
use crate::db::models::{
    RepairConfigView, Technician, TechnicianCreate, TechnicianUpdate, TechnicianView,
};
use crate::db::repository::technician::TechnicianFilter;
use crate::db::repository::{RepairConfigRepository, TechnicianRepository};
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

/// Query params for listing technicians
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
    pub name: Option<String>,
    pub number: Option<String>,
    pub config_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// GET /api/technicians - 获取技师列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Paginated<TechnicianView>>> {
    let repo = TechnicianRepository::new(state.db.clone());
    let filter = TechnicianFilter {
        name: query.name,
        number: query.number,
        config_id: query.config_id,
    };
    let (page, size, skip) = page_params(query.page, query.size);
    let (technicians, total) = repo
        .list(
            &filter,
            skip,
            size,
            query.sort_by.as_deref().unwrap_or(""),
            is_ascending(query.sort_order.as_deref()),
        )
        .await?;

    let views = hydrate_configs(&state, technicians).await?;
    Ok(Json(Paginated::new(views, Pagination::new(page, size, total))))
}

/// GET /api/technicians/:id - 获取单个技师
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TechnicianView>>> {
    let repo = TechnicianRepository::new(state.db.clone());
    let technician = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Technician {id} not found")))?;

    let mut views = hydrate_configs(&state, vec![technician]).await?;
    let view = views
        .pop()
        .ok_or_else(|| AppError::internal("Technician hydration failed"))?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/technicians - 创建技师
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TechnicianCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<TechnicianView>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.number, "number", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.config_id, "configId", MAX_NAME_LEN)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Referenced category must exist
    let config_repo = RepairConfigRepository::new(state.db.clone());
    if config_repo.find_by_id(&payload.config_id).await?.is_none() {
        return Err(AppError::not_found(format!(
            "Config {} not found",
            payload.config_id
        )));
    }

    let repo = TechnicianRepository::new(state.db.clone());
    let technician = repo.create(payload).await?;

    let mut views = hydrate_configs(&state, vec![technician]).await?;
    let view = views
        .pop()
        .ok_or_else(|| AppError::internal("Technician hydration failed"))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            view,
            "Technician created successfully",
        )),
    ))
}

/// PUT /api/technicians/:id - 更新技师
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TechnicianUpdate>,
) -> AppResult<Json<ApiResponse<TechnicianView>>> {
    if let Some(ref name) = payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref number) = payload.number {
        validate_required_text(number, "number", MAX_SHORT_TEXT_LEN)?;
    }
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Reassignment must point at an existing category
    if let Some(ref config_id) = payload.config_id {
        let config_repo = RepairConfigRepository::new(state.db.clone());
        if config_repo.find_by_id(config_id).await?.is_none() {
            return Err(AppError::not_found(format!("Config {config_id} not found")));
        }
    }

    let repo = TechnicianRepository::new(state.db.clone());
    let technician = repo.update(&id, payload).await?;

    let mut views = hydrate_configs(&state, vec![technician]).await?;
    let view = views
        .pop()
        .ok_or_else(|| AppError::internal("Technician hydration failed"))?;
    Ok(Json(ApiResponse::ok_with_message(
        view,
        "Technician updated successfully",
    )))
}

/// DELETE /api/technicians/:id - 删除技师
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = TechnicianRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        deleted,
        "Technician deleted successfully",
    )))
}

/// Attach the referenced category to each technician view
async fn hydrate_configs(
    state: &ServerState,
    technicians: Vec<Technician>,
) -> AppResult<Vec<TechnicianView>> {
    let config_ids: Vec<_> = technicians.iter().map(|t| t.config.clone()).collect();
    let config_repo = RepairConfigRepository::new(state.db.clone());
    let configs: HashMap<String, RepairConfigView> = config_repo
        .find_by_ids(&config_ids)
        .await?
        .into_iter()
        .map(|c| {
            let view = RepairConfigView::from(c);
            (view.id.clone(), view)
        })
        .collect();

    Ok(technicians
        .into_iter()
        .map(|t| {
            let mut view = TechnicianView::from(t);
            view.config = configs.get(&view.config_id).cloned();
            view
        })
        .collect())
}
