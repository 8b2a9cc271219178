//! LINE group chat push
//!
//! Thin client over the LINE Messaging API push endpoint. All notifications
//! go to the single configured group; there is no per-user targeting.

use async_trait::async_trait;
use reqwest::Client;

use shared::models::LinePushRequest;

use crate::core::Config;
use crate::utils::{AppError, AppResult};

/// Outbound chat channel
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Push a text message to the configured group
    async fn push_text(&self, text: &str) -> AppResult<()>;
}

/// HTTP client for the LINE Messaging API
pub struct LineClient {
    client: Client,
    api_base: String,
    access_token: String,
    group_id: String,
}

impl LineClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_base: config.line_api_base.clone(),
            access_token: config.line_access_token.clone(),
            group_id: config.line_group_id.clone(),
        })
    }
}

#[async_trait]
impl ChatNotifier for LineClient {
    async fn push_text(&self, text: &str) -> AppResult<()> {
        let url = format!("{}/v2/bot/message/push", self.api_base);
        let body = LinePushRequest::text(self.group_id.clone(), text);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::dependency(format!("LINE push failed: {e}")))?;

        if let Err(e) = response.error_for_status_ref() {
            return Err(AppError::dependency(format!(
                "LINE push rejected: {e}"
            )));
        }

        tracing::debug!(chars = text.len(), "LINE message pushed");
        Ok(())
    }
}
