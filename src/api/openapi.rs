//! OpenAPI documentation configuration.

use actix_web::{HttpResponse, get};
use utoipa::OpenApi;

use crate::config::SESSION_COOKIE;
use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "VibeCoders Server",
        version = "0.1.0",
        description = "JSON API behind the VibeCoders site: accounts, forum, prompts, projects, budget and administration"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Account endpoints
        api::auth::login,
        api::auth::logout,
        api::auth::register,
        api::auth::current_user,
        api::auth::update_current_user,
        api::auth::homepage_users,
        api::auth::public_profile,
        // Magic links
        api::magic_links::list_magic_links,
        api::magic_links::create_magic_link,
        api::magic_links::delete_magic_link,
        api::magic_links::redeem_magic_link,
        // Prompts
        api::prompts::list_prompts,
        api::prompts::create_prompt,
        api::prompts::update_prompt,
        api::prompts::delete_prompt,
        api::prompts::public_prompts,
        // Projects
        api::projects::list_projects,
        api::projects::create_project,
        api::projects::update_project,
        api::projects::delete_project,
        api::projects::public_projects,
        // Forum
        api::forum::list_posts,
        api::forum::create_post,
        api::forum::get_post,
        api::forum::create_comment,
        api::forum::toggle_vote,
        // Budget
        api::budget::list_categories,
        api::budget::create_category,
        api::budget::rename_category,
        api::budget::list_transactions,
        api::budget::update_transaction_category,
        api::budget::bulk_import,
        // Admin
        api::admin::list_users,
        api::admin::get_user,
        api::admin::update_user,
        api::admin::delete_user,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::MessageResponse,
            models::StatusResponse,
            models::Pagination,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Accounts
            models::User,
            models::UserSummary,
            models::SessionUser,
            models::LoginRequest,
            models::LoginResponse,
            models::RegisterRequest,
            models::UpdateProfileRequest,
            // Magic links
            models::MagicLink,
            models::CreateMagicLinkRequest,
            models::MagicLoginResponse,
            // Content
            models::Prompt,
            models::PromptRequest,
            models::Project,
            models::ProjectRequest,
            // Forum
            models::ForumPost,
            models::ForumComment,
            models::CreatePostRequest,
            models::CreateCommentRequest,
            // Budget
            models::BudgetCategory,
            models::BudgetTransaction,
            models::CategoryRequest,
            models::UpdateTransactionCategoryRequest,
            models::ImportTransaction,
            models::BulkImportRequest,
            models::BulkImportResponse,
            // Admin
            models::AdminUpdateUserRequest,
            models::AdminUserListResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Login, logout and registration"),
        (name = "Users", description = "Profiles"),
        (name = "Magic links", description = "Password-less login links"),
        (name = "Prompts", description = "Saved prompts"),
        (name = "Projects", description = "Showcase projects"),
        (name = "Forum", description = "Posts, comments and votes"),
        (name = "Budget", description = "Categories and transactions"),
        (name = "Admin", description = "User administration")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the session cookie security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::new(SESSION_COOKIE),
                    ),
                ),
            );
        }
    }
}

/// Serve the generated OpenAPI document.
#[get("/openapi.json")]
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
