//! Forum models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::UserSummary;

pub const DEFAULT_POST_LIMIT: u64 = 20;
pub const MAX_POST_LIMIT: u64 = 100;

/// Ordering of the post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    #[default]
    Top,
    Newest,
}

impl PostSort {
    /// Parse the `sort` query value; anything unknown falls back to `Top`.
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("newest") => Self::Newest,
            _ => Self::Top,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListPostsQuery {
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListPostsQuery {
    pub fn sort(&self) -> PostSort {
        PostSort::parse(self.sort.as_deref())
    }

    /// Page number, at least 1.
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// Page size, defaulting to 20 and capped at 100.
    pub fn limit(&self) -> u64 {
        self.limit
            .as_deref()
            .and_then(|l| l.parse::<u64>().ok())
            .filter(|l| *l >= 1)
            .map(|l| l.min(MAX_POST_LIMIT))
            .unwrap_or(DEFAULT_POST_LIMIT)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ForumComment {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ForumPost {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub user: UserSummary,
    /// Present only on the single-post view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<ForumComment>>,
    /// `1` when the viewer has voted on the post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_status: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub content: String,
}
