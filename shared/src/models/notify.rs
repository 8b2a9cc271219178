//! LINE Messaging API wire types
//!
//! Body of `POST /v2/bot/message/push`: a target id plus a list of
//! messages. Only text messages are sent by this system.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl LineMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinePushRequest {
    /// Group or user id the message is pushed to
    pub to: String,
    pub messages: Vec<LineMessage>,
}

impl LinePushRequest {
    pub fn text(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            messages: vec![LineMessage::text(text)],
        }
    }
}
