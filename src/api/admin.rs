//! Administrator user-management endpoints.
//!
//! Every handler takes [`AdminAuth`], which rejects non-admin sessions with 403.

use actix_web::{HttpResponse, delete, get, put, web};
use tracing::info;

use crate::api::parse_id;
use crate::auth::AdminAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{
    AdminListQuery, AdminUpdateUserRequest, AdminUserListResponse, MessageResponse, Pagination,
    User,
};

/// Configure admin routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// Paginated user listing, newest accounts first.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number, from 1"),
        ("pageSize" = Option<u64>, Query, description = "Page size, default 10, max 100")
    ),
    responses(
        (status = 200, description = "Users", body = AdminUserListResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse)
    )
)]
#[get("/admin/users")]
pub async fn list_users(
    _admin: AdminAuth,
    pool: web::Data<DbPool>,
    query: web::Query<AdminListQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page();
    let page_size = query.page_size();
    let (users, total) = pool.list_users(page, page_size).await?;

    Ok(HttpResponse::Ok().json(AdminUserListResponse {
        users: users.into_iter().map(User::from).collect(),
        pagination: Pagination::new(page, page_size, total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = User),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[get("/admin/users/{id}")]
pub async fn get_user(
    _admin: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "user")?;
    let found = pool.find_user_by_id(id).await?.ok_or_else(user_not_found)?;
    Ok(HttpResponse::Ok().json(User::from(found)))
}

/// Edit any profile field and the admin flag. A blank username keeps the current one.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = AdminUpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
#[put("/admin/users/{id}")]
pub async fn update_user(
    admin: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<AdminUpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "user")?;
    let existing = pool.find_user_by_id(id).await?.ok_or_else(user_not_found)?;

    let requested = body.username.trim();
    let username = if requested.is_empty() {
        existing.username.as_str()
    } else {
        requested
    };

    if username != existing.username
        && pool.find_user_by_username(username).await?.is_some()
    {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    pool.admin_update_user(id, username, &body)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Username already exists"))?;

    info!(admin_id = admin.user.id, user_id = id, "User updated by admin");
    Ok(HttpResponse::Ok().json(MessageResponse::new("User updated successfully")))
}

/// Delete a user together with their sessions.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Administrator access required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[delete("/admin/users/{id}")]
pub async fn delete_user(
    admin: AdminAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "user")?;
    if !pool.delete_user(id).await? {
        return Err(user_not_found());
    }

    info!(admin_id = admin.user.id, user_id = id, "User deleted by admin");
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
