//! User API Handlers
//!
//! Accounts are created and maintained by the auth service; this surface
//! only lists them so clients can pick owners and approvers.

use axum::{Json, extract::State};

use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::models::UserView;
use crate::db::repository::UserRepository;
use crate::utils::AppResult;

/// GET /api/users - 获取所有用户
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<UserView>>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserView::from).collect(),
    )))
}
