//! Prompt models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::prompt;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Prompt {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<prompt::Model> for Prompt {
    fn from(m: prompt::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            content: m.content,
            tags: split_tags(m.tags.as_deref()),
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct PromptRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl PromptRequest {
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// Join tags into the stored column form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Split the stored tag column; NULL or empty yields an empty list.
pub fn split_tags(stored: Option<&str>) -> Vec<String> {
    match stored {
        Some(s) if !s.is_empty() => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}
