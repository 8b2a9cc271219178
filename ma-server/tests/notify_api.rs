//! Repair reminder broadcast tests, including outbound failure behavior.

mod common;

use common::{request, seed_config, seed_user, spawn_app, spawn_app_with_failing_chat};
use http::StatusCode;
use serde_json::json;

async fn create_workorder(app: &common::TestApp, title: &str, detail: &str) -> String {
    let config = seed_config(&app.state, &format!("Category {title}"), "facility").await;
    let (status, body) = request(
        &app.app,
        "POST",
        "/api/workorders",
        Some(json!({
            "title": title,
            "workorderItems": [{
                "detail": detail,
                "configId": config,
                "ownerId": "user:u1",
                "approverId": "user:u2",
                "startDate": "2024-01-01",
                "endDate": "2024-01-02",
            }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["workorderItems"][0]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn reminder_without_approved_items_sends_nothing() {
    let app = spawn_app().await;

    let (status, body) = request(&app.app, "POST", "/api/notify/repairs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], 0);
    assert_eq!(body["message"], "No approved repair items");
    assert!(app.chat.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn reminder_summarizes_approved_items_only() {
    let app = spawn_app().await;
    seed_user(&app.state, "u1", "owner@example.com", true).await;
    seed_user(&app.state, "u2", "approver@example.com", true).await;

    let approved = create_workorder(&app, "Leak", "Room 3").await;
    let _pending = create_workorder(&app, "Lamp", "Hallway").await;

    // External approval system reports one item approved
    let (status, _) = request(
        &app.app,
        "PUT",
        &format!("/api/workorders/items/{approved}/status"),
        Some(json!({ "statusApproveId": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(&app.app, "POST", "/api/notify/repairs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], 1);

    let messages = app.chat.messages.lock().unwrap().clone();
    // Two creation announcements plus the reminder
    assert_eq!(messages.len(), 3);
    let reminder = messages.last().unwrap();
    assert!(reminder.contains("Leak"));
    assert!(reminder.contains("Room 3"));
    assert!(!reminder.contains("Hallway"));
}

#[tokio::test]
async fn chat_failure_never_fails_the_write_but_fails_the_reminder() {
    let app = spawn_app_with_failing_chat().await;
    seed_user(&app.state, "u1", "owner@example.com", true).await;
    seed_user(&app.state, "u2", "approver@example.com", true).await;

    // The announcement push fails, the workorder is still created
    let item = create_workorder(&app, "Leak", "Room 3").await;

    // Approval dispatch went out regardless of the dead chat channel
    assert_eq!(app.approval.requests.lock().unwrap().len(), 1);

    let (status, _) = request(
        &app.app,
        "PUT",
        &format!("/api/workorders/items/{item}/status"),
        Some(json!({ "statusApproveId": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Here the push IS the operation, so the failure surfaces
    let (status, body) = request(&app.app, "POST", "/api/notify/repairs", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
}
