//! Notification composition
//!
//! Pure formatting over the hydrated aggregate, pushed to the group chat.
//! Two messages exist: the "new workorder" announcement sent after a
//! successful create, and the on-demand reminder summarizing every item
//! currently approved for repair.

use crate::db::models::{ApprovedItem, WorkorderView};
use crate::services::line::ChatNotifier;
use crate::utils::{AppResult, time};

/// Message sent to the group when a workorder has been registered
pub fn compose_created_message(view: &WorkorderView) -> String {
    let mut message = String::from("🔔 New maintenance request!\n\n");
    message.push_str(&format!("📋 Title: {}\n", view.title));
    message.push_str(&format!("📊 Status: {}\n", view.status));
    message.push_str(&format!(
        "📅 Created: {}\n",
        time::format_human(&view.created_at)
    ));
    message.push_str("\n━━━━━━━━━━━━━━━━━━\n");

    for (index, item) in view.workorder_items.iter().enumerate() {
        message.push_str(&format!("\n📌 Item {}\n", index + 1));
        if let Some(config) = &item.config {
            message.push_str(&format!("   Category: {}\n", config.name));
        }
        message.push_str(&format!("   Detail: {}\n", item.detail));
        message.push_str(&format!(
            "   Start: {}\n",
            time::format_human(&item.start_date)
        ));
        if let Some(approver) = &item.approver {
            message.push_str(&format!("   ✅ Approver: {}\n", approver.display_name()));
        }
        if let Some(owner) = &item.owner {
            message.push_str(&format!("   👤 Owner: {}\n", owner.display_name()));
        }
        if !item.attachments.is_empty() {
            message.push_str(&format!("   📎 Attachments: {}\n", item.attachments.len()));
        }
    }

    message
}

/// Reminder summarizing every item currently approved for repair
pub fn compose_repair_reminder(items: &[ApprovedItem]) -> String {
    let mut message = String::from("🛠️ Approved repair items\n");
    message.push_str("━━━━━━━━━━━━━━━━━━\n");

    for (index, approved) in items.iter().enumerate() {
        let item = &approved.item;
        message.push_str(&format!(
            "\n📌 {}. {}\n",
            index + 1,
            approved.workorder_title
        ));
        if let Some(config) = &item.config {
            message.push_str(&format!("   Category: {}\n", config.name));
        }
        message.push_str(&format!("   Detail: {}\n", item.detail));
        message.push_str(&format!(
            "   Start: {}\n",
            time::format_human(&item.start_date)
        ));
        if let Some(owner) = &item.owner {
            message.push_str(&format!("   👤 Owner: {}\n", owner.display_name()));
        }
    }

    message
}

/// Push the "new workorder" announcement to the group chat
pub async fn notify_created(chat: &dyn ChatNotifier, view: &WorkorderView) -> AppResult<()> {
    chat.push_text(&compose_created_message(view)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::workorder::ConfigSummary;
    use crate::db::models::{AttachmentView, WorkorderItemView};
    use shared::models::UserSummary;

    fn sample_view() -> WorkorderView {
        WorkorderView {
            id: "workorder:w1".to_string(),
            title: "Leak".to_string(),
            status: "PENDING".to_string(),
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            workorder_items: vec![
                WorkorderItemView {
                    id: "workorder_item:a".to_string(),
                    detail: "Room 3".to_string(),
                    start_date: "2024-01-01T00:00:00+00:00".to_string(),
                    end_date: "2024-01-02T00:00:00+00:00".to_string(),
                    comment: None,
                    config: Some(ConfigSummary {
                        id: "config:c1".to_string(),
                        name: "Plumbing".to_string(),
                        config_type: "facility".to_string(),
                    }),
                    owner: Some(UserSummary {
                        id: "user:u1".to_string(),
                        email: "owner@example.com".to_string(),
                        first_name: Some("Ann".to_string()),
                        last_name: Some("Lee".to_string()),
                    }),
                    approver: None,
                    status_approve_id: 1,
                    status_approve: Some("Pending".to_string()),
                    attachments: vec![AttachmentView {
                        id: "attachment:f1".to_string(),
                        url: "https://files.example/a.png".to_string(),
                    }],
                },
                WorkorderItemView {
                    id: "workorder_item:b".to_string(),
                    detail: "Hallway lamp".to_string(),
                    start_date: "2024-02-01T00:00:00+00:00".to_string(),
                    end_date: "2024-02-02T00:00:00+00:00".to_string(),
                    comment: None,
                    config: None,
                    owner: None,
                    approver: None,
                    status_approve_id: 1,
                    status_approve: None,
                    attachments: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn created_message_numbers_items_in_order() {
        let message = compose_created_message(&sample_view());
        let first = message.find("📌 Item 1").unwrap();
        let second = message.find("📌 Item 2").unwrap();
        assert!(first < second);
        assert!(message.contains("📋 Title: Leak"));
        assert!(message.contains("Category: Plumbing"));
        assert!(message.contains("👤 Owner: Ann Lee"));
        assert!(message.contains("📎 Attachments: 1"));
    }

    #[test]
    fn created_message_omits_absent_fields() {
        let message = compose_created_message(&sample_view());
        // The second item has no config, owner, approver or attachments;
        // its block ends after the start date.
        let second_block = &message[message.find("📌 Item 2").unwrap()..];
        assert!(!second_block.contains("Category:"));
        assert!(!second_block.contains("Owner:"));
        assert!(!second_block.contains("Attachments:"));
    }

    #[test]
    fn reminder_lists_parent_titles() {
        let view = sample_view();
        let items = vec![ApprovedItem {
            workorder_title: view.title.clone(),
            item: view.workorder_items[0].clone(),
        }];
        let message = compose_repair_reminder(&items);
        assert!(message.contains("📌 1. Leak"));
        assert!(message.contains("Detail: Room 3"));
    }
}
