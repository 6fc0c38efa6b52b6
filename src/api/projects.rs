//! Project endpoints.

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::api::parse_id;
use crate::auth::SessionAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{MessageResponse, Project, ProjectRequest};

const REQUIRED_FIELDS: &str = "Title and description are required";

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_projects)
        .service(create_project)
        .service(update_project)
        .service(delete_project)
        .service(public_projects);
}

fn to_views(models: Vec<crate::entity::project::Model>) -> Vec<Project> {
    models.into_iter().map(Project::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "The caller's projects, newest first", body = [Project]),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[get("/projects")]
pub async fn list_projects(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let projects = pool.list_projects(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(to_views(projects)))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = ProjectRequest,
    responses(
        (status = 201, description = "Created", body = Project),
        (status = 400, description = "Title and description are required", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[post("/projects")]
pub async fn create_project(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    if !body.is_valid() {
        return Err(AppError::InvalidInput(REQUIRED_FIELDS.to_string()));
    }

    let created = pool.insert_project(auth.user_id(), &body).await?;
    info!(user_id = auth.user_id(), project_id = created.id, "Project created");
    Ok(HttpResponse::Created().json(Project::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    request_body = ProjectRequest,
    responses(
        (status = 200, description = "Updated", body = Project),
        (status = 400, description = "Invalid ID or missing fields", body = ErrorResponse),
        (status = 403, description = "Owned by another user", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[put("/projects/{id}")]
pub async fn update_project(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<ProjectRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "project")?;
    pool.find_owned_project(id, auth.user_id(), "update").await?;

    if !body.is_valid() {
        return Err(AppError::InvalidInput(REQUIRED_FIELDS.to_string()));
    }

    let updated = pool.update_project(id, auth.user_id(), &body).await?;
    Ok(HttpResponse::Ok().json(Project::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Owned by another user", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    )
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "project")?;
    pool.find_owned_project(id, auth.user_id(), "delete").await?;
    pool.delete_project(id, auth.user_id()).await?;

    info!(user_id = auth.user_id(), project_id = id, "Project deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Project deleted successfully")))
}

/// Projects published by a user; unknown users yield an empty list.
#[utoipa::path(
    get,
    path = "/api/users/{username}/projects",
    tag = "Projects",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Projects", body = [Project])
    )
)]
#[get("/users/{username}/projects")]
pub async fn public_projects(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let projects = pool.list_projects_by_username(&path).await?;
    Ok(HttpResponse::Ok().json(to_views(projects)))
}
