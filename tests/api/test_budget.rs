//! Budget categories, transactions and bulk import.

use actix_web::http::Method;
use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_categories_are_per_user_and_unique() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let alice = sign_up(&app, "alice").await;
    let bob = sign_up(&app, "bob").await;

    for name in ["Rent", "Food"] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/budget/categories",
            Some(&alice),
            Some(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(body["name"], name);
    }

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/budget/categories",
        Some(&alice),
        Some(json!({"name": "Rent"})),
    )
    .await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "Category already exists");

    // Same name under another account is fine.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/budget/categories",
        Some(&bob),
        Some(json!({"name": "Rent"})),
    )
    .await;
    assert_eq!(status, 201);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/budget/categories",
        Some(&bob),
        Some(json!({"name": "  "})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Category name cannot be empty");

    let (_, body) = send(&app, Method::GET, "/api/budget/categories", Some(&alice), None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Food", "Rent"]);
}

#[actix_rt::test]
async fn test_rename_category() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let alice = sign_up(&app, "alice").await;
    let bob = sign_up(&app, "bob").await;

    let (_, fun) = send(
        &app,
        Method::POST,
        "/api/budget/categories",
        Some(&alice),
        Some(json!({"name": "Fun"})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/budget/categories",
        Some(&alice),
        Some(json!({"name": "Travel"})),
    )
    .await;
    let uri = format!("/api/budget/categories/{}", fun["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&alice),
        Some(json!({"name": "Leisure"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Leisure");

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&alice),
        Some(json!({"name": "Travel"})),
    )
    .await;
    assert_eq!(status, 409);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&bob),
        Some(json!({"name": "Mine now"})),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Category not found");
}

#[actix_rt::test]
async fn test_bulk_import_and_listing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "saver").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/budget/transactions/bulk",
        Some(&cookie),
        Some(json!({"transactions": [
            {"date": "2024-01-05", "amount": -42.5, "description": "Groceries"},
            {"date": "2024-02-01", "amount": "1200", "description": "Salary"}
        ]})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(body["status"], "success");
    assert_eq!(body["count"], 2);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/budget/transactions",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, 200);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["description"], "Salary");
    assert_eq!(rows[0]["amount"], 1200.0);
    assert_eq!(rows[1]["amount"], -42.5);
    assert!(rows[1]["category_id"].is_null());
    assert!(rows[1].get("category_name").is_none());
}

#[actix_rt::test]
async fn test_bulk_import_is_all_or_nothing() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let cookie = sign_up(&app, "atomic").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/budget/transactions/bulk",
        Some(&cookie),
        Some(json!({"transactions": [
            {"date": "2024-02-01", "amount": -42.5, "description": "groceries"},
            {"date": "2024-02-03", "amount": "1200", "description": "salary"}
        ]})),
    )
    .await;
    assert_eq!(status, 201);

    let (_, before) = send(
        &app,
        Method::GET,
        "/api/budget/transactions",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(before.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/budget/transactions/bulk",
        Some(&cookie),
        Some(json!({"transactions": [
            {"date": "2024-03-01", "amount": 10, "description": "ok"},
            {"date": "2024-03-02", "amount": "ten", "description": "bad"},
            {"date": "2024-03-03", "amount": 30, "description": "never reached"}
        ]})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Failed to import transaction 2: invalid amount");

    let (_, after) = send(
        &app,
        Method::GET,
        "/api/budget/transactions",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(after, before);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/budget/transactions/bulk",
        Some(&cookie),
        Some(json!({"transactions": []})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "No transactions to import");
}

#[actix_rt::test]
async fn test_assign_and_clear_category() {
    let pool = create_test_pool().await;
    let app = create_test_app(&pool).await;
    let owner = sign_up(&app, "owner").await;
    let other = sign_up(&app, "other").await;

    send(
        &app,
        Method::POST,
        "/api/budget/transactions/bulk",
        Some(&owner),
        Some(json!({"transactions": [
            {"date": "2024-04-01", "amount": 5, "description": "Coffee"}
        ]})),
    )
    .await;
    let (_, rows) = send(&app, Method::GET, "/api/budget/transactions", Some(&owner), None).await;
    let txn_id = rows[0]["id"].clone();

    let (_, category) = send(
        &app,
        Method::POST,
        "/api/budget/categories",
        Some(&owner),
        Some(json!({"name": "Drinks"})),
    )
    .await;
    let (_, foreign) = send(
        &app,
        Method::POST,
        "/api/budget/categories",
        Some(&other),
        Some(json!({"name": "Theirs"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/budget/transactions/category",
        Some(&owner),
        Some(json!({"transaction_id": txn_id, "category_id": category["id"]})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");

    let (_, rows) = send(&app, Method::GET, "/api/budget/transactions", Some(&owner), None).await;
    assert_eq!(rows[0]["category_id"], category["id"]);
    assert_eq!(rows[0]["category_name"], "Drinks");

    // Another user's category is treated as missing.
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/budget/transactions/category",
        Some(&owner),
        Some(json!({"transaction_id": txn_id, "category_id": foreign["id"]})),
    )
    .await;
    assert_eq!(status, 404);

    // Another user's transaction is off limits.
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/budget/transactions/category",
        Some(&other),
        Some(json!({"transaction_id": txn_id, "category_id": null})),
    )
    .await;
    assert_eq!(status, 403);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/budget/transactions/category",
        Some(&owner),
        Some(json!({"transaction_id": txn_id, "category_id": null})),
    )
    .await;
    assert_eq!(status, 200);

    let (_, rows) = send(&app, Method::GET, "/api/budget/transactions", Some(&owner), None).await;
    assert!(rows[0]["category_id"].is_null());

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/budget/transactions/category",
        Some(&owner),
        Some(json!({"transaction_id": 9999, "category_id": null})),
    )
    .await;
    assert_eq!(status, 404);
}
