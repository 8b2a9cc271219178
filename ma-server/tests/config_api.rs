//! Config, technician, status dictionary and user endpoint tests.

mod common;

use common::{request, seed_config, seed_user, spawn_app};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn config_crud_round_trip() {
    let app = spawn_app().await;

    let (status, body) = request(
        &app.app,
        "POST",
        "/api/configs",
        Some(json!({ "name": "Electrical", "type": "facility" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["name"], "Electrical");
    assert_eq!(body["data"]["type"], "facility");

    // Duplicate names conflict
    let (status, _) = request(
        &app.app,
        "POST",
        "/api/configs",
        Some(json!({ "name": "Electrical", "type": "facility" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Missing fields are rejected
    let (status, _) = request(
        &app.app,
        "POST",
        "/api/configs",
        Some(json!({ "name": "", "type": "facility" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(
        &app.app,
        "PUT",
        &format!("/api/configs/{id}"),
        Some(json!({ "name": "Electrical & HVAC" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Electrical & HVAC");
    assert_eq!(body["data"]["type"], "facility");

    let (status, _) = request(
        &app.app,
        "PUT",
        "/api/configs/ghost",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&app.app, "DELETE", &format!("/api/configs/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&app.app, "GET", &format!("/api/configs/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn config_list_filters_and_types() {
    let app = spawn_app().await;
    seed_config(&app.state, "Electrical", "facility").await;
    seed_config(&app.state, "Plumbing", "facility").await;
    seed_config(&app.state, "Aircon service", "vendor").await;

    let (_, body) = request(&app.app, "GET", "/api/configs?name=plumb", None).await;
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["name"], "Plumbing");

    let (_, body) = request(&app.app, "GET", "/api/configs?type=vendor", None).await;
    assert_eq!(body["pagination"]["total"], 1);

    let (_, body) = request(&app.app, "GET", "/api/configs?page=1&size=2", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["totalPages"], 2);

    let (status, body) = request(&app.app, "GET", "/api/configs/types", None).await;
    assert_eq!(status, StatusCode::OK);
    let types = body["data"].as_array().unwrap();
    assert_eq!(types.len(), 2);
    assert!(types.contains(&json!("facility")));
    assert!(types.contains(&json!("vendor")));
}

#[tokio::test]
async fn config_delete_refused_while_technicians_reference_it() {
    let app = spawn_app().await;
    let config = seed_config(&app.state, "Plumbing", "facility").await;

    let (status, body) = request(
        &app.app,
        "POST",
        "/api/technicians",
        Some(json!({
            "name": "Somchai",
            "number": "081-000-0000",
            "configId": config,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let technician_id = body["data"]["id"].as_str().unwrap().to_string();

    // Referenced config cannot be deleted
    let (status, body) = request(&app.app, "DELETE", &format!("/api/configs/{config}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("technicians"));

    // Still there
    let (status, _) = request(&app.app, "GET", &format!("/api/configs/{config}"), None).await;
    assert_eq!(status, StatusCode::OK);

    // Remove the technician, then the config goes away
    let (status, _) = request(
        &app.app,
        "DELETE",
        &format!("/api/technicians/{technician_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&app.app, "DELETE", &format!("/api/configs/{config}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn technician_crud_and_validation() {
    let app = spawn_app().await;
    let config = seed_config(&app.state, "Plumbing", "facility").await;
    let other = seed_config(&app.state, "Electrical", "facility").await;

    // Unknown category is a 404
    let (status, _) = request(
        &app.app,
        "POST",
        "/api/technicians",
        Some(json!({ "name": "Somchai", "number": "081", "configId": "config:ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Malformed contact URL is a 400
    let (status, _) = request(
        &app.app,
        "POST",
        "/api/technicians",
        Some(json!({
            "name": "Somchai",
            "number": "081",
            "configId": config,
            "url": "not a url",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(
        &app.app,
        "POST",
        "/api/technicians",
        Some(json!({
            "name": "Somchai",
            "number": "081-000-0000",
            "spareNumber": "082-000-0000",
            "url": "https://line.me/somchai",
            "configId": config,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["config"]["name"], "Plumbing");

    // Filter by category
    let (_, body) = request(
        &app.app,
        "GET",
        &format!("/api/technicians?configId={other}"),
        None,
    )
    .await;
    assert_eq!(body["pagination"]["total"], 0);
    let (_, body) = request(
        &app.app,
        "GET",
        &format!("/api/technicians?configId={config}"),
        None,
    )
    .await;
    assert_eq!(body["pagination"]["total"], 1);

    // Reassign to another category
    let (status, body) = request(
        &app.app,
        "PUT",
        &format!("/api/technicians/{id}"),
        Some(json!({ "configId": other })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["config"]["name"], "Electrical");

    // Reassignment to an unknown category fails
    let (status, _) = request(
        &app.app,
        "PUT",
        &format!("/api/technicians/{id}"),
        Some(json!({ "configId": "config:ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&app.app, "DELETE", &format!("/api/technicians/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = request(&app.app, "GET", &format!("/api/technicians/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_dictionary_is_seeded_and_appendable() {
    let app = spawn_app().await;

    let (status, body) = request(&app.app, "GET", "/api/status-approves", None).await;
    assert_eq!(status, StatusCode::OK);
    let statuses = body["data"].as_array().unwrap();
    assert_eq!(statuses[0], json!({ "id": 1, "name": "Pending" }));
    assert_eq!(statuses[1], json!({ "id": 2, "name": "Approved" }));

    let (status, body) = request(
        &app.app,
        "POST",
        "/api/status-approves",
        Some(json!({ "name": "Rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"], json!({ "id": 3, "name": "Rejected" }));

    let (status, _) = request(
        &app.app,
        "POST",
        "/api/status-approves",
        Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_endpoint_lists_seeded_accounts() {
    let app = spawn_app().await;
    seed_user(&app.state, "u1", "a@example.com", true).await;
    seed_user(&app.state, "u2", "b@example.com", false).await;

    let (status, body) = request(&app.app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "a@example.com");
    assert_eq!(users[0]["active"], true);
    assert_eq!(users[1]["active"], false);
}

#[tokio::test]
async fn health_endpoint_answers() {
    let app = spawn_app().await;
    let (status, body) = request(&app.app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}
