//! Server-rendered pages, SPA routes and embedded assets.

use actix_web::cookie::Cookie;
use actix_web::test;
use sea_orm::ConnectionTrait;

use super::test_helpers::*;

async fn get_text<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> (u16, String)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let mut req = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[actix_rt::test]
async fn test_faq_page() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, html) = get_text(&app, "/faq", None).await;
    assert_eq!(status, 200);
    assert!(html.contains("<title>FAQ"));
}

#[actix_rt::test]
async fn test_apps_page_greets_logged_in_user() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, html) = get_text(&app, "/apps", None).await;
    assert_eq!(status, 200);
    assert!(html.contains("Log in"));

    let cookie = sign_up(&app, "visitor").await;
    let (status, html) = get_text(&app, "/apps", Some(&cookie)).await;
    assert_eq!(status, 200);
    assert!(html.contains("Welcome back, visitor."));

    // A stale cookie renders the anonymous page instead of failing.
    let stale = Cookie::new("session_token", "garbage");
    let (status, html) = get_text(&app, "/apps", Some(&stale)).await;
    assert_eq!(status, 200);
    assert!(html.contains("Log in"));
}

#[actix_rt::test]
async fn test_apps_page_fails_when_sessions_are_unreadable() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "unlucky").await;

    pool.connection()
        .execute_unprepared("DROP TABLE sessions")
        .await
        .unwrap();

    let (status, _) = get_text(&app, "/apps", Some(&cookie)).await;
    assert_eq!(status, 500);

    let (status, html) = get_text(&app, "/apps", None).await;
    assert_eq!(status, 200);
    assert!(html.contains("Log in"));
}

#[actix_rt::test]
async fn test_spa_routes_serve_index() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    for uri in ["/", "/login", "/forum/12", "/admin/users/3", "/apps/budget", "/magic/abc"] {
        let (status, html) = get_text(&app, uri, None).await;
        assert_eq!(status, 200, "{}", uri);
        assert!(html.contains("<div id=\"root\">"), "{}", uri);
    }
}

#[actix_rt::test]
async fn test_static_assets_and_missing_files() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/index.html").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let (status, _) = get_text(&app, "/missing.js", None).await;
    assert_eq!(status, 404);

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/missing.js").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 405);
}
