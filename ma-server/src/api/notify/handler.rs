//! Notify API Handlers
//!
//! On-demand broadcast summarizing every item currently approved for
//! repair. Callable manually or by an external scheduler; here the chat
//! push IS the operation, so its failure surfaces to the caller.

use axum::{Json, extract::State};

use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::models::status_approve::APPROVED_STATUS_ID;
use crate::db::repository::{StatusApproveRepository, WorkorderRepository};
use crate::services::notify;
use crate::utils::AppResult;

/// POST /api/notify/repairs - 推送已批准维修项提醒
pub async fn repair_reminder(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<usize>>> {
    let repo = WorkorderRepository::new(state.db.clone());
    let approved = repo
        .items_in_status(StatusApproveRepository::record_id(APPROVED_STATUS_ID))
        .await?;

    if approved.is_empty() {
        return Ok(Json(ApiResponse::ok_with_message(
            0,
            "No approved repair items",
        )));
    }

    let message = notify::compose_repair_reminder(&approved);
    state.chat.push_text(&message).await?;

    Ok(Json(ApiResponse::ok_with_message(
        approved.len(),
        "Repair reminder sent",
    )))
}
