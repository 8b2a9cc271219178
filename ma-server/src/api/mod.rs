//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`users`] - 用户只读接口
//! - [`configs`] - 维修类别管理接口
//! - [`technicians`] - 维修技师管理接口
//! - [`status_approves`] - 审批状态字典接口
//! - [`workorders`] - 工单管理接口 (含审批回调)
//! - [`notify`] - 手动触发的群聊提醒

pub mod configs;
pub mod health;
pub mod notify;
pub mod status_approves;
pub mod technicians;
pub mod users;
pub mod workorders;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(configs::router())
        .merge(technicians::router())
        .merge(status_approves::router())
        .merge(workorders::router())
        .merge(notify::router())
}

/// Build the fully configured application with middleware and state applied
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}

// ── Pagination parameters shared by the list endpoints ───────────────

/// Clamp client paging input: page from 1, size from 1 (default 10)
pub(crate) fn page_params(page: i64, size: i64) -> (i64, i64, i64) {
    let page = if page >= 1 { page } else { 1 };
    let size = if size >= 1 { size } else { 10 };
    let skip = (page - 1) * size;
    (page, size, skip)
}

/// `sortOrder=asc` (any case) sorts ascending, everything else descending
pub(crate) fn is_ascending(sort_order: Option<&str>) -> bool {
    sort_order.is_some_and(|order| order.eq_ignore_ascii_case("asc"))
}
