//! Account endpoints: login, logout, registration and user profiles.

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};
use tracing::info;

use crate::auth::{SessionAuth, clear_session_cookie, session_cookie};
use crate::config::SESSION_COOKIE;
use crate::db::DbPool;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SessionUser,
    UpdateProfileRequest, User,
};
use crate::services::accounts;

/// Configure account routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login)
        .service(logout)
        .service(register)
        .service(current_user)
        .service(update_current_user)
        .service(homepage_users)
        .service(public_profile);
}

/// Log in with username and password.
///
/// Sets the `session_token` cookie on success.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
#[post("/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let body = body.into_inner();
    let session = accounts::login(pool.get_ref(), body.username.trim(), &body.password).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&session.token))
        .json(LoginResponse {
            message: "Login successful".to_string(),
            user: SessionUser {
                id: session.user.id,
                username: session.user.username,
            },
        }))
}

/// Log out: delete the session row and clear the cookie.
#[utoipa::path(
    delete,
    path = "/api/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
#[delete("/logout")]
pub async fn logout(req: HttpRequest, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let Some(cookie) = req.cookie(SESSION_COOKIE) else {
        return Ok(HttpResponse::Ok().json(MessageResponse::new("Already logged out")));
    };

    let removed = pool.delete_session(cookie.value()).await?;
    if removed > 0 {
        info!("Session closed");
    }

    Ok(HttpResponse::Ok()
        .cookie(clear_session_cookie())
        .json(MessageResponse::new("Logout successful")))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = MessageResponse),
        (status = 400, description = "Missing fields or passwords differ", body = ErrorResponse),
        (status = 409, description = "Username already exists", body = ErrorResponse)
    )
)]
#[post("/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    accounts::register(pool.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("User registered successfully")))
}

/// The logged-in user's profile.
#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Users",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[get("/user")]
pub async fn current_user(auth: SessionAuth) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(User::from(auth.user)))
}

/// Update bio and links on the logged-in user's profile.
#[utoipa::path(
    patch,
    path = "/api/user",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[patch("/user")]
pub async fn update_current_user(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    pool.update_profile(auth.user_id(), &body).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("User updated successfully")))
}

/// The three earliest members, shown on the landing page.
#[utoipa::path(
    get,
    path = "/api/homepage-users",
    tag = "Users",
    responses(
        (status = 200, description = "Users", body = [User])
    )
)]
#[get("/homepage-users")]
pub async fn homepage_users(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let users: Vec<User> = pool
        .homepage_users()
        .await?
        .into_iter()
        .map(User::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

/// Public profile by username.
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Profile", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
#[get("/users/{username}")]
pub async fn public_profile(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let found = pool
        .find_user_by_username(&path)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(HttpResponse::Ok().json(User::from(found)))
}
