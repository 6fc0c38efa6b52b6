//! Project models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::project;

/// Project as returned on the wire; absent URLs serialize as `""`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Project {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub github_url: String,
    pub website_url: String,
    pub image_url1: String,
    pub image_url2: String,
    pub image_url3: String,
    pub created_at: DateTime<Utc>,
}

impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            title: m.title,
            description: m.description,
            github_url: m.github_url.unwrap_or_default(),
            website_url: m.website_url.unwrap_or_default(),
            image_url1: m.image_url1.unwrap_or_default(),
            image_url2: m.image_url2.unwrap_or_default(),
            image_url3: m.image_url3.unwrap_or_default(),
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProjectRequest {
    pub title: String,
    pub description: String,
    pub github_url: String,
    pub website_url: String,
    pub image_url1: String,
    pub image_url2: String,
    pub image_url3: String,
}

impl ProjectRequest {
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}
