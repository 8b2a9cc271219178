//! Status Approve API Handlers
//!
//! The approval status dictionary. Ids 1 (Pending) and 2 (Approved) are
//! seeded at startup; extra statuses may be appended but never removed.

use axum::{Json, extract::State, http::StatusCode};

use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::models::{StatusApproveCreate, StatusApproveView};
use crate::db::repository::StatusApproveRepository;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::AppResult;

/// GET /api/status-approves - 获取审批状态字典
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<StatusApproveView>>>> {
    let repo = StatusApproveRepository::new(state.db.clone());
    let statuses = repo.find_all().await?;
    Ok(Json(ApiResponse::ok(
        statuses.into_iter().map(StatusApproveView::from).collect(),
    )))
}

/// POST /api/status-approves - 追加审批状态
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StatusApproveCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<StatusApproveView>>)> {
    validate_required_text(&payload.name, "name", MAX_SHORT_TEXT_LEN)?;

    let repo = StatusApproveRepository::new(state.db.clone());
    let status = repo.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            status.into(),
            "Status created successfully",
        )),
    ))
}
