//! Prompts and projects: ownership, validation and public listings.

use actix_web::http::Method;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_prompt_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "writer").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/prompts",
        Some(&cookie),
        Some(json!({"title": "Refactor", "content": "Make it idiomatic", "tags": ["rust", "style"]})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["tags"], json!(["rust", "style"]));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/prompts",
        Some(&cookie),
        Some(json!({"title": "Untagged", "content": "No tags here"})),
    )
    .await;
    assert_eq!(status, 201);

    let (_, list) = send(&app, Method::GET, "/api/prompts", Some(&cookie), None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["title"], "Untagged");
    assert_eq!(list[0]["tags"], json!([]));

    let uri = format!("/api/prompts/{}", created["id"]);
    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&cookie),
        Some(json!({"title": "Refactor v2", "content": "Tighter", "tags": []})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["title"], "Refactor v2");
    assert_eq!(updated["tags"], json!([]));

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&cookie), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Prompt deleted successfully");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&cookie), None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Prompt not found");
}

#[actix_rt::test]
async fn test_prompt_ownership_and_validation() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let owner = sign_up(&app, "owner").await;
    let intruder = sign_up(&app, "intruder").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/prompts",
        Some(&owner),
        Some(json!({"title": "", "content": "x"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Title and content are required");

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/prompts",
        Some(&owner),
        Some(json!({"title": "Mine", "content": "Hands off"})),
    )
    .await;
    let uri = format!("/api/prompts/{}", created["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&intruder),
        Some(json!({"title": "Stolen", "content": "ha"})),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "You don't have permission to update this prompt");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&intruder), None).await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "You don't have permission to delete this prompt");

    let (status, _) = send(&app, Method::PUT, "/api/prompts/x1", Some(&owner), None).await;
    assert_eq!(status, 400);

    let (_, public) = send(&app, Method::GET, "/api/users/owner/prompts", None, None).await;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["title"], "Mine");

    let (_, none) = send(&app, Method::GET, "/api/users/intruder/prompts", None, None).await;
    assert_eq!(none, json!([]));
}

#[actix_rt::test]
async fn test_project_lifecycle() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let owner = sign_up(&app, "maker").await;
    let other = sign_up(&app, "viewer").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&owner),
        Some(json!({
            "title": "Tiny DB",
            "description": "A key value store",
            "github_url": "https://github.example/maker/tinydb",
            "image_url1": "https://img.example/1.png"
        })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["website_url"], "");
    assert_eq!(created["image_url1"], "https://img.example/1.png");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(&owner),
        Some(json!({"title": "No description"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Title and description are required");

    let uri = format!("/api/projects/{}", created["id"]);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&other),
        Some(json!({"title": "Mine", "description": "now"})),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "You don't have permission to update this project");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "You don't have permission to delete this project");

    let (_, public) = send(&app, Method::GET, "/api/users/maker/projects", None, None).await;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["id"], created["id"]);
    assert_eq!(public[0]["title"], "Tiny DB");
    assert_eq!(public[0]["description"], "A key value store");
    assert_eq!(public[0]["github_url"], "https://github.example/maker/tinydb");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&owner),
        Some(json!({"title": "Tiny DB", "description": "Now with WAL"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["description"], "Now with WAL");
    assert_eq!(updated["github_url"], "");

    let (_, public) = send(&app, Method::GET, "/api/users/maker/projects", None, None).await;
    assert_eq!(public.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, 200);
    let (_, mine) = send(&app, Method::GET, "/api/projects", Some(&owner), None).await;
    assert_eq!(mine, json!([]));
}
