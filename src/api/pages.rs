//! HTML pages: the two server-rendered templates and the SPA shell.

use actix_web::http::Method;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, get, web};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tera::Context;

use crate::auth::OptionalSessionAuth;
use crate::error::{AppError, AppResult};
use crate::services::{PageRenderer, assets};

/// Client-side routes answered with the SPA entry document.
pub const SPA_ROUTES: &[&str] = &[
    "/",
    "/login",
    "/register",
    "/profile",
    "/users/{username}",
    "/forum",
    "/forum/new",
    "/forum/{id}",
    "/admin",
    "/admin/{tail:.*}",
    "/apps/book",
    "/apps/budget",
    "/magic/{token}",
    "/magic-links",
];

/// Configure page routes. Register after the `/api` scope.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(faq).service(apps);
    for route in SPA_ROUTES {
        cfg.route(route, web::get().to(spa_index));
    }
    cfg.default_service(web::to(static_asset));
}

#[derive(Serialize)]
struct PageUser {
    id: i32,
    username: String,
    fullname: String,
    is_admin: bool,
}

fn base_context(title: &str, description: &str) -> Context {
    let mut ctx = Context::new();
    ctx.insert("title", title);
    ctx.insert("description", description);
    ctx.insert("year", &Utc::now().year().to_string());
    ctx
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(body)
}

#[get("/faq")]
pub async fn faq(renderer: web::Data<PageRenderer>) -> AppResult<HttpResponse> {
    let ctx = base_context(
        "FAQ",
        "Frequently Asked Questions about vibecoding and VibeCoders platform",
    );
    Ok(html(renderer.render("faq.html", &ctx)?))
}

/// Apps page; greets the visitor when a valid session cookie is present.
#[get("/apps")]
pub async fn apps(
    renderer: web::Data<PageRenderer>,
    OptionalSessionAuth(auth): OptionalSessionAuth,
) -> AppResult<HttpResponse> {
    let mut ctx = base_context("Apps", "Saas Apps Replaced By Vibing");
    if let Some(auth) = auth {
        ctx.insert(
            "user",
            &PageUser {
                id: auth.user.id,
                username: auth.user.username,
                fullname: auth.user.fullname.unwrap_or_default(),
                is_admin: auth.user.is_admin,
            },
        );
    }
    Ok(html(renderer.render("apps.html", &ctx)?))
}

pub async fn spa_index() -> AppResult<HttpResponse> {
    let index = assets::index()
        .ok_or_else(|| AppError::Internal("Error reading index.html".to_string()))?;
    Ok(HttpResponse::Ok()
        .insert_header(ContentType::html())
        .body(index.body.into_owned()))
}

/// Serve a file from the embedded bundle, or 404.
pub async fn static_asset(req: HttpRequest) -> HttpResponse {
    if !matches!(*req.method(), Method::GET | Method::HEAD) {
        return HttpResponse::MethodNotAllowed().finish();
    }

    match assets::get(req.path()) {
        Some(asset) => HttpResponse::Ok()
            .content_type(asset.content_type)
            .body(asset.body.into_owned()),
        None => HttpResponse::NotFound().finish(),
    }
}
