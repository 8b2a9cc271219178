//! Shared test harness: in-memory database, recording fakes for the
//! outbound collaborators, and oneshot calls against the real router.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use tower::Service;

use ma_server::api;
use ma_server::core::{Config, ServerState};
use ma_server::db::DbService;
use ma_server::db::models::UserCreate;
use ma_server::db::models::{RepairConfig, RepairConfigCreate};
use ma_server::db::repository::{RepairConfigRepository, UserRepository};
use ma_server::services::{ApprovalGateway, ChatNotifier};
use ma_server::utils::{AppError, AppResult};
use shared::models::ApprovalRequest;

/// Chat fake that records every pushed message
#[derive(Default)]
pub struct RecordingChat {
    pub messages: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatNotifier for RecordingChat {
    async fn push_text(&self, text: &str) -> AppResult<()> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Chat fake whose pushes always fail
pub struct FailingChat;

#[async_trait]
impl ChatNotifier for FailingChat {
    async fn push_text(&self, _text: &str) -> AppResult<()> {
        Err(AppError::dependency("chat transport down"))
    }
}

/// Approval fake that records every dispatched request
#[derive(Default)]
pub struct RecordingApproval {
    pub requests: Mutex<Vec<ApprovalRequest>>,
}

#[async_trait]
impl ApprovalGateway for RecordingApproval {
    async fn request_approval(&self, request: &ApprovalRequest) -> AppResult<()> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub state: ServerState,
    pub app: Router,
    pub chat: Arc<RecordingChat>,
    pub approval: Arc<RecordingApproval>,
}

fn test_config() -> Config {
    Config {
        work_dir: "/tmp/ma-server-test".to_string(),
        http_port: 0,
        environment: "development".to_string(),
        public_base_url: "http://localhost:8000".to_string(),
        line_api_base: "http://localhost:9".to_string(),
        line_access_token: "test-token".to_string(),
        line_group_id: "test-group".to_string(),
        approval_api_url: "http://localhost:9/api/approvals".to_string(),
        request_timeout_ms: 1000,
    }
}

/// Full application over an in-memory database with recording fakes
pub async fn spawn_app() -> TestApp {
    let db = DbService::memory().await.expect("in-memory db");
    let chat = Arc::new(RecordingChat::default());
    let approval = Arc::new(RecordingApproval::default());
    let state = ServerState::with_services(
        test_config(),
        db.db,
        chat.clone(),
        approval.clone(),
    );
    let app = api::build_app(state.clone());
    TestApp {
        state,
        app,
        chat,
        approval,
    }
}

/// Same application but with a chat channel that always fails
pub async fn spawn_app_with_failing_chat() -> TestApp {
    let db = DbService::memory().await.expect("in-memory db");
    let chat = Arc::new(RecordingChat::default());
    let approval = Arc::new(RecordingApproval::default());
    let state = ServerState::with_services(
        test_config(),
        db.db,
        Arc::new(FailingChat),
        approval.clone(),
    );
    let app = api::build_app(state.clone());
    TestApp {
        state,
        app,
        chat,
        approval,
    }
}

/// Drive one request through the router without a network stack
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let mut svc = app.clone();
    let response = svc.call(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

/// Insert an account the way the auth service would
pub async fn seed_user(state: &ServerState, key: &str, email: &str, active: bool) {
    UserRepository::new(state.db.clone())
        .create(
            key,
            UserCreate {
                email: email.to_string(),
                first_name: Some("Test".to_string()),
                last_name: Some(key.to_uppercase()),
                active,
            },
        )
        .await
        .expect("seed user");
}

/// Insert a repair category and return its `config:key` id
pub async fn seed_config(state: &ServerState, name: &str, config_type: &str) -> String {
    let config: RepairConfig = RepairConfigRepository::new(state.db.clone())
        .create(RepairConfigCreate {
            name: name.to_string(),
            config_type: config_type.to_string(),
        })
        .await
        .expect("seed config");
    config.id.expect("config id").to_string()
}
