//! Workorder API 模块
//!
//! 工单聚合的增删改查，以及外部审批系统回调的条目状态入口。

mod handler;
mod validate;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub use validate::validate_items;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/workorders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Status callback invoked by the external approval system
        .route("/items/{id}/status", put(handler::update_item_status))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
