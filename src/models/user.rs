//! User, session and admin request/response models.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::user;

/// Public profile of a user. The password column is never serialized.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub fullname: String,
    pub bio: String,
    pub linked_in_url: String,
    pub github_url: String,
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
    pub is_admin: bool,
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            fullname: m.fullname.unwrap_or_default(),
            bio: m.bio.unwrap_or_default(),
            linked_in_url: m.linked_in_url.unwrap_or_default(),
            github_url: m.github_url.unwrap_or_default(),
            photo_url: m.photo_url.unwrap_or_default(),
            created_at: m.created_at,
            is_admin: m.is_admin,
        }
    }
}

/// Author details embedded in forum posts and comments.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub fullname: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserSummary {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            fullname: m.fullname.unwrap_or_default(),
            is_admin: m.is_admin,
            created_at: m.created_at,
        }
    }
}

/// Minimal identity returned after a login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: SessionUser,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[schema(value_type = String)]
    pub password: SecretString,
    #[schema(value_type = String)]
    pub confirm_password: SecretString,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub linked_in_url: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub photo_url: String,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub bio: String,
    pub linked_in_url: String,
    pub github_url: String,
    pub photo_url: String,
}

/// Full user edit performed by an administrator.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AdminUpdateUserRequest {
    pub username: String,
    pub fullname: String,
    pub bio: String,
    pub linked_in_url: String,
    pub github_url: String,
    pub photo_url: String,
    pub is_admin: bool,
}

/// Query string of the admin user listing.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdminListQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminUserListResponse {
    pub users: Vec<User>,
    pub pagination: super::Pagination,
}

/// Convert an optional text field to its stored form; blank becomes NULL.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
