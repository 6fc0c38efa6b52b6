//! Magic link endpoints.

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::Utc;

use crate::api::parse_id;
use crate::auth::{SessionAuth, session_cookie};
use crate::db::DbPool;
use crate::error::{AppResult, ErrorResponse};
use crate::models::{
    CreateMagicLinkRequest, MagicLink, MagicLoginResponse, MessageResponse, SessionUser,
};
use crate::services::accounts;

/// Configure magic link routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_magic_links)
        .service(create_magic_link)
        .service(delete_magic_link)
        .service(redeem_magic_link);
}

#[utoipa::path(
    get,
    path = "/api/magic-links",
    tag = "Magic links",
    responses(
        (status = 200, description = "The caller's links, newest first", body = [MagicLink]),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[get("/magic-links")]
pub async fn list_magic_links(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let links: Vec<MagicLink> = pool
        .list_magic_links(auth.user_id())
        .await?
        .into_iter()
        .map(MagicLink::from)
        .collect();
    Ok(HttpResponse::Ok().json(links))
}

/// Create a link valid for seven days. The body is optional.
#[utoipa::path(
    post,
    path = "/api/magic-links",
    tag = "Magic links",
    request_body(content = CreateMagicLinkRequest, description = "Optional redirect target"),
    responses(
        (status = 201, description = "Created", body = MagicLink),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[post("/magic-links")]
pub async fn create_magic_link(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: Option<web::Json<CreateMagicLinkRequest>>,
) -> AppResult<HttpResponse> {
    let redirect = body.map(|b| b.into_inner().redirect_url).unwrap_or_default();
    let link =
        accounts::create_magic_link(pool.get_ref(), auth.user_id(), &redirect, Utc::now()).await?;
    Ok(HttpResponse::Created().json(MagicLink::from(link)))
}

#[utoipa::path(
    delete,
    path = "/api/magic-links/{id}",
    tag = "Magic links",
    params(
        ("id" = i32, Path, description = "Magic link ID")
    ),
    responses(
        (status = 200, description = "Deleted (or nothing to delete)", body = MessageResponse),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[delete("/magic-links/{id}")]
pub async fn delete_magic_link(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "magic link")?;
    pool.delete_magic_link(id, auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Magic link deleted successfully")))
}

/// Exchange a magic link token for a session cookie.
#[utoipa::path(
    get,
    path = "/api/magic/{token}",
    tag = "Magic links",
    params(
        ("token" = String, Path, description = "Magic link token")
    ),
    responses(
        (status = 200, description = "Logged in", body = MagicLoginResponse),
        (status = 404, description = "Invalid or expired magic link", body = ErrorResponse)
    )
)]
#[get("/magic/{token}")]
pub async fn redeem_magic_link(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let (session, link) = accounts::redeem_magic_link(pool.get_ref(), &path, Utc::now()).await?;
    let link = MagicLink::from(link);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&session.token))
        .json(MagicLoginResponse {
            message: "Login successful".to_string(),
            user: SessionUser {
                id: session.user.id,
                username: session.user.username,
            },
            redirect_url: link.redirect_url,
        }))
}
