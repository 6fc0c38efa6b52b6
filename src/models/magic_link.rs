//! Magic link models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::SessionUser;
use crate::entity::magic_link;

/// Redirect target used when a link does not name one.
pub const DEFAULT_REDIRECT: &str = "/";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MagicLink {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub redirect_url: String,
}

impl From<magic_link::Model> for MagicLink {
    fn from(m: magic_link::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            token: m.token,
            created_at: m.created_at,
            expires_at: m.expires_at,
            redirect_url: m
                .redirect_url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_REDIRECT.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateMagicLinkRequest {
    pub redirect_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MagicLoginResponse {
    pub message: String,
    pub user: SessionUser,
    pub redirect_url: String,
}
