// src/types/chat.rs
//! Candidate/employer conversation threads tied to an offer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Audio,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub offer: Option<String>,
    pub candidate: Option<String>,
    pub entreprise: Option<String>,
    #[serde(default)]
    pub is_accepted: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub unread_count: u32,
    pub last_message: Option<ChatMessage>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub sender: String,
    pub content: Option<String>,
    #[serde(rename = "type", default = "default_message_type")]
    pub kind: MessageType,
    pub media_url: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

fn default_message_type() -> MessageType {
    MessageType::Text
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    pub offer_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl SendMessageRequest {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: MessageType::Text,
            content: Some(content.into()),
            media_url: None,
        }
    }

    pub fn media(kind: MessageType, media_url: impl Into<String>) -> Self {
        Self {
            kind,
            content: None,
            media_url: Some(media_url.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl MessagePage {
    pub fn has_more(&self) -> bool {
        match (self.total, self.page, self.limit) {
            (Some(total), Some(page), Some(limit)) => u64::from(page) * u64::from(limit) < total,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(alias = "fileUrl")]
    pub url: String,
    #[serde(rename = "type")]
    pub kind: Option<MessageType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanCallResponse {
    pub can_call: bool,
    pub reason: Option<String>,
    pub chat_id: Option<String>,
}
