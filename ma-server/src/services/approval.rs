//! Approval dispatch
//!
//! One outbound request per workorder item that has both an owner and an
//! approver. The external system answers later through the item status
//! callback; this side only hands over context. No retries, no queueing —
//! a failed dispatch is logged and does not undo the stored workorder.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;

use shared::models::ApprovalRequest;

use crate::core::Config;
use crate::db::models::WorkorderView;
use crate::db::repository::record_key;
use crate::utils::{AppError, AppResult};

/// Outbound approval service
#[async_trait]
pub trait ApprovalGateway: Send + Sync {
    async fn request_approval(&self, request: &ApprovalRequest) -> AppResult<()>;
}

/// HTTP client for the external approval endpoint
pub struct HttpApprovalClient {
    client: Client,
    endpoint: String,
}

impl HttpApprovalClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: config.approval_api_url.clone(),
        })
    }
}

#[async_trait]
impl ApprovalGateway for HttpApprovalClient {
    async fn request_approval(&self, request: &ApprovalRequest) -> AppResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::dependency(format!("Approval request failed: {e}")))?;

        if let Err(e) = response.error_for_status_ref() {
            return Err(AppError::dependency(format!(
                "Approval request rejected: {e}"
            )));
        }
        Ok(())
    }
}

/// Build one approval payload per item that carries both an owner and an
/// approver. The callback URL points at the item status endpoint.
pub fn approval_requests_for(view: &WorkorderView, public_base_url: &str) -> Vec<ApprovalRequest> {
    view.workorder_items
        .iter()
        .filter_map(|item| {
            let owner = item.owner.as_ref()?;
            let approver = item.approver.as_ref()?;
            let item_key = record_key("workorder_item", &item.id);
            Some(ApprovalRequest {
                title: item
                    .config
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| view.title.clone()),
                detail: item.detail.clone(),
                comment: item.comment.clone(),
                callback_url: format!(
                    "{}/api/workorders/items/{}/status",
                    public_base_url.trim_end_matches('/'),
                    item_key
                ),
                approver_id: approver.id.clone(),
                owner_id: owner.id.clone(),
            })
        })
        .collect()
}

/// Fan the approval requests out concurrently.
///
/// Every failure is logged; siblings are never blocked by one another. The
/// first error is returned so the caller can decide to surface or drop it.
pub async fn dispatch_approvals(
    gateway: &dyn ApprovalGateway,
    view: &WorkorderView,
    public_base_url: &str,
) -> AppResult<usize> {
    let requests = approval_requests_for(view, public_base_url);
    if requests.is_empty() {
        return Ok(0);
    }

    let results = join_all(
        requests
            .iter()
            .map(|request| gateway.request_approval(request)),
    )
    .await;

    let mut first_error = None;
    let mut sent = 0usize;
    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(()) => sent += 1,
            Err(e) => {
                tracing::warn!(
                    callback = %request.callback_url,
                    error = %e,
                    "Approval dispatch failed"
                );
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(sent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::workorder::ConfigSummary;
    use crate::db::models::{WorkorderItemView, WorkorderView};
    use shared::models::UserSummary;

    fn summary(id: &str) -> UserSummary {
        UserSummary {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            first_name: None,
            last_name: None,
        }
    }

    fn item(id: &str, owner: Option<&str>, approver: Option<&str>) -> WorkorderItemView {
        WorkorderItemView {
            id: id.to_string(),
            detail: "Room 3".to_string(),
            start_date: "2024-01-01T00:00:00+00:00".to_string(),
            end_date: "2024-01-02T00:00:00+00:00".to_string(),
            comment: None,
            config: Some(ConfigSummary {
                id: "config:c1".to_string(),
                name: "Plumbing".to_string(),
                config_type: "facility".to_string(),
            }),
            owner: owner.map(summary),
            approver: approver.map(summary),
            status_approve_id: 1,
            status_approve: Some("Pending".to_string()),
            attachments: Vec::new(),
        }
    }

    fn view(items: Vec<WorkorderItemView>) -> WorkorderView {
        WorkorderView {
            id: "workorder:w1".to_string(),
            title: "Leak".to_string(),
            status: "PENDING".to_string(),
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            workorder_items: items,
        }
    }

    #[test]
    fn skips_items_without_both_parties() {
        let view = view(vec![
            item("workorder_item:a", Some("user:u1"), Some("user:u2")),
            item("workorder_item:b", Some("user:u1"), None),
            item("workorder_item:c", None, Some("user:u2")),
        ]);
        let requests = approval_requests_for(&view, "http://localhost:8000");
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].callback_url,
            "http://localhost:8000/api/workorders/items/a/status"
        );
    }

    #[test]
    fn title_is_the_category_name() {
        let view = view(vec![item(
            "workorder_item:a",
            Some("user:u1"),
            Some("user:u2"),
        )]);
        let requests = approval_requests_for(&view, "http://localhost:8000/");
        assert_eq!(requests[0].title, "Plumbing");
        assert_eq!(requests[0].owner_id, "user:u1");
        assert_eq!(requests[0].approver_id, "user:u2");
    }
}
