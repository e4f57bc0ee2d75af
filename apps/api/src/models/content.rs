use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generation::content_type::ContentType;

/// One generated artifact. Never edited after the batch that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// The trimmed keyword this artifact was generated for.
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i32>,
}

impl GeneratedContent {
    pub fn new(content_type: ContentType, keyword: &str, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_type,
            name: keyword.trim().to_string(),
            text,
            image_url: None,
            image_prompt: None,
            seo_keywords: None,
            meta_title: None,
            meta_description: None,
            timestamp: Utc::now(),
            progress: None,
        }
    }
}
