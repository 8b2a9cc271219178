//! Workorder payload guard
//!
//! Pure pre-write validation of the nested item batch: required fields are
//! aggregated across all items (the batch is never partially accepted),
//! owner/approver ids must belong to active users, and every referenced
//! repair category must exist. No writes happen here.

use std::collections::HashSet;

use surrealdb::RecordId;

use crate::core::ServerState;
use crate::db::models::{ValidItem, WorkorderItemInput};
use crate::db::repository::{RepairConfigRepository, UserRepository, rid};
use crate::utils::validation::{MAX_NOTE_LEN, MAX_URL_LEN};
use crate::utils::{AppError, AppResult, time};

/// Required fields of every item, in the order they are reported
const REQUIRED_FIELDS: [(&str, fn(&WorkorderItemInput) -> bool); 6] = [
    ("detail", |item| is_blank(&item.detail)),
    ("ownerId", |item| is_blank(&item.owner_id)),
    ("approverId", |item| is_blank(&item.approver_id)),
    ("startDate", |item| is_blank(&item.start_date)),
    ("endDate", |item| is_blank(&item.end_date)),
    ("configId", |item| is_blank(&item.config_id)),
];

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Validate the submitted batch and resolve it into write-ready items.
pub async fn validate_items(
    state: &ServerState,
    items: &[WorkorderItemInput],
) -> AppResult<Vec<ValidItem>> {
    if items.is_empty() {
        return Err(AppError::validation(
            "At least one workorder item is required",
        ));
    }

    // Shape first: collect every problem of every item before failing
    let mut problems = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let number = index + 1;
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .filter(|(_, absent)| absent(item))
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            problems.push(format!("item {number}: missing {}", missing.join(", ")));
        }

        for (field, value) in [("startDate", &item.start_date), ("endDate", &item.end_date)] {
            if let Some(raw) = value.as_deref()
                && !raw.trim().is_empty()
                && time::normalize_date(raw).is_none()
            {
                problems.push(format!("item {number}: invalid {field}"));
            }
        }

        if item
            .detail
            .as_deref()
            .is_some_and(|d| d.len() > MAX_NOTE_LEN)
        {
            problems.push(format!("item {number}: detail too long"));
        }
        if item
            .attachments
            .iter()
            .any(|url| url.trim().is_empty() || url.len() > MAX_URL_LEN)
        {
            problems.push(format!("item {number}: invalid attachment url"));
        }
    }
    if !problems.is_empty() {
        return Err(AppError::validation(problems.join("; ")));
    }

    // Every referenced owner/approver must be an active user
    let mut user_ids: Vec<RecordId> = Vec::new();
    let mut seen = HashSet::new();
    for item in items {
        for reference in [&item.owner_id, &item.approver_id].into_iter().flatten() {
            let id = rid("user", reference);
            if seen.insert(id.to_string()) {
                user_ids.push(id);
            }
        }
    }
    let active = UserRepository::new(state.db.clone())
        .find_active_ids(&user_ids)
        .await?;
    let invalid: Vec<String> = user_ids
        .iter()
        .map(ToString::to_string)
        .filter(|id| !active.contains(id))
        .collect();
    if !invalid.is_empty() {
        return Err(AppError::validation(format!(
            "Invalid or inactive user IDs: {}",
            invalid.join(", ")
        )));
    }

    // Every referenced category must exist (cheap, item-scoped check)
    let mut config_ids: Vec<RecordId> = Vec::new();
    let mut seen = HashSet::new();
    for item in items {
        if let Some(reference) = &item.config_id {
            let id = rid("config", reference);
            if seen.insert(id.to_string()) {
                config_ids.push(id);
            }
        }
    }
    let existing: HashSet<String> = RepairConfigRepository::new(state.db.clone())
        .existing_ids(&config_ids)
        .await?
        .iter()
        .map(ToString::to_string)
        .collect();
    if let Some(absent) = config_ids
        .iter()
        .find(|id| !existing.contains(&id.to_string()))
    {
        return Err(AppError::not_found(format!("Config {absent} not found")));
    }

    // Shape and references are good; resolve into write-ready items
    Ok(items
        .iter()
        .map(|item| ValidItem {
            detail: item.detail.clone().unwrap_or_default(),
            config: rid("config", item.config_id.as_deref().unwrap_or_default()),
            owner: rid("user", item.owner_id.as_deref().unwrap_or_default()),
            approver: rid("user", item.approver_id.as_deref().unwrap_or_default()),
            start_date: item
                .start_date
                .as_deref()
                .and_then(time::normalize_date)
                .unwrap_or_default(),
            end_date: item
                .end_date
                .as_deref()
                .and_then(time::normalize_date)
                .unwrap_or_default(),
            comment: item.comment.clone(),
            attachments: item.attachments.clone(),
        })
        .collect())
}
