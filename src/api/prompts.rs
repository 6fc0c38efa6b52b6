//! Prompt endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::api::parse_id;
use crate::auth::SessionAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{MessageResponse, Prompt, PromptRequest};

const REQUIRED_FIELDS: &str = "Title and content are required";

/// Configure prompt routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_prompts)
        .service(create_prompt)
        .service(update_prompt)
        .service(delete_prompt)
        .service(public_prompts);
}

fn to_views(models: Vec<crate::entity::prompt::Model>) -> Vec<Prompt> {
    models.into_iter().map(Prompt::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/prompts",
    tag = "Prompts",
    responses(
        (status = 200, description = "The caller's prompts, newest first", body = [Prompt]),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[get("/prompts")]
pub async fn list_prompts(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let prompts = pool.list_prompts(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(to_views(prompts)))
}

#[utoipa::path(
    post,
    path = "/api/prompts",
    tag = "Prompts",
    request_body = PromptRequest,
    responses(
        (status = 201, description = "Created", body = Prompt),
        (status = 400, description = "Title and content are required", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[post("/prompts")]
pub async fn create_prompt(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<PromptRequest>,
) -> AppResult<HttpResponse> {
    if !body.is_valid() {
        return Err(AppError::InvalidInput(REQUIRED_FIELDS.to_string()));
    }

    let created = pool.insert_prompt(auth.user_id(), &body).await?;
    info!(user_id = auth.user_id(), prompt_id = created.id, "Prompt created");
    Ok(HttpResponse::Created().json(Prompt::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/prompts/{id}",
    tag = "Prompts",
    params(
        ("id" = i32, Path, description = "Prompt ID")
    ),
    request_body = PromptRequest,
    responses(
        (status = 200, description = "Updated", body = Prompt),
        (status = 400, description = "Invalid ID or missing fields", body = ErrorResponse),
        (status = 403, description = "Owned by another user", body = ErrorResponse),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    )
)]
#[put("/prompts/{id}")]
pub async fn update_prompt(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<PromptRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "prompt")?;
    pool.find_owned_prompt(id, auth.user_id(), "update").await?;

    if !body.is_valid() {
        return Err(AppError::InvalidInput(REQUIRED_FIELDS.to_string()));
    }

    let updated = pool.update_prompt(id, auth.user_id(), &body).await?;
    Ok(HttpResponse::Ok().json(Prompt::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/prompts/{id}",
    tag = "Prompts",
    params(
        ("id" = i32, Path, description = "Prompt ID")
    ),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Owned by another user", body = ErrorResponse),
        (status = 404, description = "Prompt not found", body = ErrorResponse)
    )
)]
#[delete("/prompts/{id}")]
pub async fn delete_prompt(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "prompt")?;
    pool.find_owned_prompt(id, auth.user_id(), "delete").await?;
    pool.delete_prompt(id, auth.user_id()).await?;

    info!(user_id = auth.user_id(), prompt_id = id, "Prompt deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Prompt deleted successfully")))
}

/// Prompts published by a user; unknown users yield an empty list.
#[utoipa::path(
    get,
    path = "/api/users/{username}/prompts",
    tag = "Prompts",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Prompts", body = [Prompt])
    )
)]
#[get("/users/{username}/prompts")]
pub async fn public_prompts(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let prompts = pool.list_prompts_by_username(&path).await?;
    Ok(HttpResponse::Ok().json(to_views(prompts)))
}
