//! Registration, login, logout and profile endpoints.

use actix_web::http::Method;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_register_and_login() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = register(&app, "alice", "pw-1234").await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "User registered successfully");

    let cookie = login(&app, "alice", "pw-1234").await;
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));

    let (status, body) = send(&app, Method::GET, "/api/user", Some(&cookie), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["is_admin"], false);
    assert!(body.get("password").is_none(), "password must never be serialized");
}

#[actix_rt::test]
async fn test_password_is_stored_hashed() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    register(&app, "hashme", "plain-text").await;
    let stored = pool
        .find_user_by_username("hashme")
        .await
        .unwrap()
        .expect("user exists");
    assert_ne!(stored.password, "plain-text");
    assert!(stored.password.starts_with("$argon2"));
}

#[actix_rt::test]
async fn test_register_validation() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({"username": "", "password": "x", "confirm_password": "x"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Username and password are required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({"username": "bob", "password": "one", "confirm_password": "two"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Passwords do not match");

    register(&app, "bob", "pw").await;
    let (status, body) = register(&app, "bob", "other").await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "Username already exists");
}

#[actix_rt::test]
async fn test_login_rejects_bad_credentials() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    register(&app, "carol", "right").await;

    for (user, pass) in [("carol", "wrong"), ("nobody", "right")] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({"username": user, "password": pass})),
        )
        .await;
        assert_eq!(status, 401);
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[actix_rt::test]
async fn test_malformed_body_is_bad_request() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let req = actix_web::test::TestRequest::post()
        .uri("/api/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_session_required() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = send(&app, Method::GET, "/api/user", None, None).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "Not logged in");

    let bogus = actix_web::cookie::Cookie::new("session_token", "not-a-uuid");
    let (status, body) = send(&app, Method::GET, "/api/user", Some(&bogus), None).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "Invalid session");

    let unknown = actix_web::cookie::Cookie::new(
        "session_token",
        "00000000-0000-4000-8000-000000000000",
    );
    let (status, _) = send(&app, Method::GET, "/api/user", Some(&unknown), None).await;
    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_logout_invalidates_session() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "dave").await;

    let (status, body) = send(&app, Method::DELETE, "/api/logout", Some(&cookie), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Logout successful");

    let (status, _) = send(&app, Method::GET, "/api/user", Some(&cookie), None).await;
    assert_eq!(status, 401);

    let (status, body) = send(&app, Method::DELETE, "/api/logout", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Already logged out");
}

#[actix_rt::test]
async fn test_update_profile_and_public_view() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "erin").await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/user",
        Some(&cookie),
        Some(json!({
            "bio": "Builds things",
            "linked_in_url": "https://linkedin.example/erin",
            "github_url": "https://github.example/erin",
            "photo_url": ""
        })),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = send(&app, Method::GET, "/api/users/erin", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["bio"], "Builds things");
    assert_eq!(body["github_url"], "https://github.example/erin");
    assert_eq!(body["photo_url"], "");

    let (status, body) = send(&app, Method::GET, "/api/users/ghost", None, None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "User not found");
}

#[actix_rt::test]
async fn test_homepage_users_are_first_three() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    for name in ["u1", "u2", "u3", "u4"] {
        register(&app, name, "pw").await;
    }

    let (status, body) = send(&app, Method::GET, "/api/homepage-users", None, None).await;
    assert_eq!(status, 200);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["u1", "u2", "u3"]);
}

#[actix_rt::test]
async fn test_health_and_unknown_api_route() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "vibecoders");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = send(&app, Method::GET, "/api/ready", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "ready", "database": "connected", "schema": "migrated"}));

    let (status, body) = send(&app, Method::GET, "/api/openapi.json", None, None).await;
    assert_eq!(status, 200);
    assert!(body["paths"]["/api/forum/{id}/vote"].is_object());

    let (status, body) = send(&app, Method::GET, "/api/does-not-exist", None, None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not found");
}

#[actix_rt::test]
async fn test_ready_requires_schema() {
    let pool = vibecoders_lib::db::DbPool::connect("sqlite::memory:", 1)
        .await
        .unwrap();
    let app = create_test_app(&pool).await;

    let (status, body) = send(&app, Method::GET, "/api/ready", None, None).await;
    assert_eq!(status, 503);
    assert_eq!(
        body["error"],
        "Database schema missing; run `vibecoders-admin migrate`"
    );

    let (status, _) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, 200);
}
