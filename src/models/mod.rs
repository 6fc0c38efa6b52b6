//! Request and response models for the VibeCoders API.

use serde::Serialize;
use utoipa::ToSchema;

pub mod budget;
pub mod forum;
pub mod magic_link;
pub mod project;
pub mod prompt;
pub mod user;

// Re-export commonly used types
pub use budget::{
    BudgetCategory, BudgetTransaction, BulkImportRequest, BulkImportResponse, CategoryRequest,
    ImportTransaction, UpdateTransactionCategoryRequest,
};
pub use forum::{
    CreateCommentRequest, CreatePostRequest, ForumComment, ForumPost, ListPostsQuery, PostSort,
};
pub use magic_link::{CreateMagicLinkRequest, MagicLink, MagicLoginResponse};
pub use project::{Project, ProjectRequest};
pub use prompt::{Prompt, PromptRequest};
pub use user::{
    AdminListQuery, AdminUpdateUserRequest, AdminUserListResponse, LoginRequest, LoginResponse,
    RegisterRequest, SessionUser, UpdateProfileRequest, User, UserSummary,
};

pub const DEFAULT_ADMIN_PAGE_SIZE: u64 = 10;
pub const MAX_ADMIN_PAGE_SIZE: u64 = 100;

/// `{"message": ...}` body used by mutations without a richer result.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"status": "success"}` body of the budget mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Pagination metadata for the admin user listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Create pagination metadata.
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };

        Pagination {
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

impl AdminListQuery {
    /// Page number, at least 1.
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// Page size, defaulting to 10 and capped at 100.
    pub fn page_size(&self) -> u64 {
        self.page_size
            .as_deref()
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(MAX_ADMIN_PAGE_SIZE))
            .unwrap_or(DEFAULT_ADMIN_PAGE_SIZE)
    }
}
