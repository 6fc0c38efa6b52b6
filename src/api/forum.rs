//! Forum endpoints.

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::api::parse_id;
use crate::auth::{OptionalSessionAuth, SessionAuth};
use crate::db::DbPool;
use crate::db::forum::VoteChange;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::user::non_empty;
use crate::models::{CreateCommentRequest, CreatePostRequest, ForumPost, ListPostsQuery};

/// Configure forum routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_posts)
        .service(create_post)
        .service(get_post)
        .service(create_comment)
        .service(toggle_vote);
}

/// List posts. `sort` is `top` (default) or `newest`.
#[utoipa::path(
    get,
    path = "/api/forum",
    tag = "Forum",
    params(
        ("sort" = Option<String>, Query, description = "top | newest"),
        ("page" = Option<u64>, Query, description = "Page number, from 1"),
        ("limit" = Option<u64>, Query, description = "Page size, default 20, max 100")
    ),
    responses(
        (status = 200, description = "Posts without comments", body = [ForumPost])
    )
)]
#[get("/forum")]
pub async fn list_posts(
    pool: web::Data<DbPool>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = pool
        .list_posts(query.sort(), query.page(), query.limit())
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    post,
    path = "/api/forum",
    tag = "Forum",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Created", body = ForumPost),
        (status = 400, description = "Title is required", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[post("/forum")]
pub async fn create_post(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()));
    }

    let created = pool
        .insert_post(
            auth.user_id(),
            title,
            non_empty(&body.content),
            non_empty(&body.url),
        )
        .await?;
    info!(user_id = auth.user_id(), post_id = created.id, "Forum post created");

    let view = pool.get_post(created.id, Some(auth.user_id())).await?;
    Ok(HttpResponse::Created().json(view))
}

/// A post with its comments. Anonymous readers get no `vote_status`.
#[utoipa::path(
    get,
    path = "/api/forum/{id}",
    tag = "Forum",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post with comments", body = ForumPost),
        (status = 400, description = "Invalid post ID", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Session lookup failed", body = ErrorResponse)
    )
)]
#[get("/forum/{id}")]
pub async fn get_post(
    auth: OptionalSessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "post")?;
    let viewer = auth.0.map(|a| a.user_id());
    Ok(HttpResponse::Ok().json(pool.get_post(id, viewer).await?))
}

#[utoipa::path(
    post,
    path = "/api/forum/{id}/comments",
    tag = "Forum",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Post including the new comment", body = ForumPost),
        (status = 400, description = "Comment content is required", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[post("/forum/{id}/comments")]
pub async fn create_comment(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "post")?;
    let content = body.content.trim();
    if content.is_empty() {
        return Err(AppError::InvalidInput(
            "Comment content is required".to_string(),
        ));
    }

    pool.insert_comment(id, auth.user_id(), content).await?;
    let view = pool.get_post(id, Some(auth.user_id())).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Toggle the caller's vote on a post.
#[utoipa::path(
    post,
    path = "/api/forum/{id}/vote",
    tag = "Forum",
    params(
        ("id" = i32, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post with updated score", body = ForumPost),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[post("/forum/{id}/vote")]
pub async fn toggle_vote(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "post")?;
    let change = pool.toggle_vote(id, auth.user_id()).await?;
    info!(
        user_id = auth.user_id(),
        post_id = id,
        added = change == VoteChange::Added,
        "Vote toggled"
    );

    let view = pool.get_post(id, Some(auth.user_id())).await?;
    Ok(HttpResponse::Ok().json(view))
}
