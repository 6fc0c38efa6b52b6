//! Forum posts, comments and the vote toggle.

use actix_web::cookie::Cookie;
use actix_web::http::Method;
use futures_util::future::join_all;
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use vibecoders_lib::db::forum::VoteChange;

use super::test_helpers::*;

async fn create_post<S>(app: &S, cookie: &Cookie<'static>, title: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = send(
        app,
        Method::POST,
        "/api/forum",
        Some(cookie),
        Some(json!({"title": title, "content": "body text", "url": ""})),
    )
    .await;
    assert_eq!(status, 201, "create post failed: {}", body);
    body
}

#[actix_rt::test]
async fn test_create_and_view_post() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "poster").await;

    let post = create_post(&app, &cookie, "Hello forum").await;
    assert_eq!(post["score"], 0);
    assert_eq!(post["user"]["username"], "poster");
    assert!(post.get("url").is_none(), "blank url is stored as null");

    let id = post["id"].as_i64().unwrap();
    let (status, body) = send(&app, Method::GET, &format!("/api/forum/{}", id), None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["title"], "Hello forum");
    assert_eq!(body["comments"], json!([]));
    assert!(body.get("vote_status").is_none());
}

#[actix_rt::test]
async fn test_view_post_reports_session_store_failure() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "reader").await;
    let uri = format!("/api/forum/{}", create_post(&app, &cookie, "Broken store").await["id"]);

    pool.connection()
        .execute_unprepared("DROP TABLE sessions")
        .await
        .unwrap();

    let (status, body) = send(&app, Method::GET, &uri, Some(&cookie), None).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "An internal database error occurred");

    // Without a usable token the lookup never runs.
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, 200);
    let garbage = Cookie::new("session_token", "garbage");
    let (status, body) = send(&app, Method::GET, &uri, Some(&garbage), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["title"], "Broken store");
}

#[actix_rt::test]
async fn test_post_requires_title_and_session() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/forum",
        None,
        Some(json!({"title": "anon"})),
    )
    .await;
    assert_eq!(status, 401);

    let cookie = sign_up(&app, "blank").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/forum",
        Some(&cookie),
        Some(json!({"title": "   "})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Title is required");
}

#[actix_rt::test]
async fn test_get_post_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;

    let (status, body) = send(&app, Method::GET, "/api/forum/abc", None, None).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid post ID");

    let (status, body) = send(&app, Method::GET, "/api/forum/999", None, None).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Post not found");
}

#[actix_rt::test]
async fn test_comments_are_oldest_first() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "talker").await;
    let id = create_post(&app, &cookie, "Thread").await["id"].as_i64().unwrap();
    let uri = format!("/api/forum/{}/comments", id);

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(&cookie),
        Some(json!({"content": ""})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Comment content is required");

    for text in ["first", "second"] {
        let (status, _) = send(
            &app,
            Method::POST,
            &uri,
            Some(&cookie),
            Some(json!({"content": text})),
        )
        .await;
        assert_eq!(status, 201);
    }

    let (_, body) = send(&app, Method::GET, &format!("/api/forum/{}", id), None, None).await;
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "first");
    assert_eq!(comments[1]["content"], "second");
    assert_eq!(comments[0]["user"]["username"], "talker");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/forum/4242/comments",
        Some(&cookie),
        Some(json!({"content": "lost"})),
    )
    .await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_vote_toggles() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let author = sign_up(&app, "author").await;
    let voter = sign_up(&app, "voter").await;
    let id = create_post(&app, &author, "Vote on me").await["id"].as_i64().unwrap();
    let uri = format!("/api/forum/{}/vote", id);

    let (status, body) = send(&app, Method::POST, &uri, Some(&voter), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["score"], 1);
    assert_eq!(body["vote_status"], 1);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/forum/{}", id),
        Some(&voter),
        None,
    )
    .await;
    assert_eq!(body["vote_status"], 1);

    let (status, body) = send(&app, Method::POST, &uri, Some(&voter), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["score"], 0);
    assert!(body.get("vote_status").is_none());

    let (status, _) = send(&app, Method::POST, "/api/forum/777/vote", Some(&voter), None).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_score_matches_vote_rows_under_concurrency() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let author = sign_up(&app, "popular").await;
    let post_id = create_post(&app, &author, "Hot take").await["id"].as_i64().unwrap() as i32;

    let mut voters = Vec::new();
    for i in 0..6 {
        let name = format!("fan{}", i);
        register(&app, &name, "pw").await;
        voters.push(pool.find_user_by_username(&name).await.unwrap().unwrap().id);
    }

    // Everyone votes, then the even-indexed voters toggle a second time.
    let first = join_all(voters.iter().map(|uid| pool.toggle_vote(post_id, *uid))).await;
    assert!(first.iter().all(|r| matches!(r, Ok(VoteChange::Added))));

    let second = join_all(
        voters
            .iter()
            .step_by(2)
            .map(|uid| pool.toggle_vote(post_id, *uid)),
    )
    .await;
    assert!(second.iter().all(|r| matches!(r, Ok(VoteChange::Removed))));

    let post = pool.get_post(post_id, None).await.unwrap();
    let rows = pool.count_votes(post_id).await.unwrap();
    assert_eq!(rows, 3);
    assert_eq!(post.score as u64, rows);
}

#[actix_rt::test]
async fn test_listing_sorts() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "lister").await;

    let older = create_post(&app, &cookie, "older").await["id"].as_i64().unwrap();
    create_post(&app, &cookie, "newer").await;
    send(
        &app,
        Method::POST,
        &format!("/api/forum/{}/vote", older),
        Some(&cookie),
        None,
    )
    .await;

    let titles = |body: &Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, top) = send(&app, Method::GET, "/api/forum?sort=top", None, None).await;
    assert_eq!(titles(&top), vec!["older", "newer"]);
    assert!(top[0].get("comments").is_none());

    let (_, newest) = send(&app, Method::GET, "/api/forum?sort=newest", None, None).await;
    assert_eq!(titles(&newest), vec!["newer", "older"]);

    let uri = "/api/forum?sort=newest&page=2&limit=1";
    let (_, paged) = send(&app, Method::GET, uri, None, None).await;
    assert_eq!(titles(&paged), vec!["older"]);

    let (status, _) = send(&app, Method::GET, "/api/forum?page=zero&limit=-4", None, None).await;
    assert_eq!(status, 200);
}

#[actix_rt::test]
async fn test_listing_far_past_the_end_is_empty() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "pager").await;
    create_post(&app, &cookie, "only post").await;

    for uri in [
        "/api/forum?page=18446744073709551615&limit=100",
        "/api/forum?page=100000000000000000&limit=100",
        "/api/forum?sort=newest&page=92233720368547759",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, 200, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }
}
