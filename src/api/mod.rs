//! API endpoint modules.

pub mod admin;
pub mod auth;
pub mod budget;
pub mod forum;
pub mod health;
pub mod magic_links;
pub mod openapi;
pub mod pages;
pub mod projects;
pub mod prompts;

use actix_web::{HttpResponse, web};

use crate::error::{AppError, AppResult, ErrorResponse};

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use pages::configure_routes as configure_page_routes;

/// Parse a numeric path segment, e.g. "Invalid post ID".
pub(crate) fn parse_id(raw: &str, what: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::InvalidInput(format!("Invalid {} ID", what)))
}

/// Mount every JSON endpoint under `/api`.
///
/// Body, path and query extraction failures are reported as 400 with the
/// usual `{"error": ...}` body.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(format!("Invalid request body: {}", err)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(format!("Invalid path: {}", err)).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::InvalidInput(format!("Invalid query: {}", err)).into()
            }))
            .configure(configure_health_routes)
            .service(openapi::openapi_json)
            .configure(auth::configure_routes)
            .configure(magic_links::configure_routes)
            .configure(prompts::configure_routes)
            .configure(projects::configure_routes)
            .configure(forum::configure_routes)
            .configure(budget::configure_routes)
            .configure(admin::configure_routes)
            .default_service(web::to(|| async {
                HttpResponse::NotFound().json(ErrorResponse {
                    error: "Not found".to_string(),
                })
            })),
    );
}
