//! Budget endpoints: categories, transactions and bulk import.

use actix_web::{HttpResponse, get, post, put, web};
use tracing::info;

use crate::api::parse_id;
use crate::auth::SessionAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{
    BudgetCategory, BudgetTransaction, BulkImportRequest, BulkImportResponse, CategoryRequest,
    StatusResponse, UpdateTransactionCategoryRequest,
};

/// Configure budget routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories)
        .service(create_category)
        .service(rename_category)
        .service(list_transactions)
        .service(update_transaction_category)
        .service(bulk_import);
}

fn category_name(req: &CategoryRequest) -> AppResult<&str> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(name)
}

#[utoipa::path(
    get,
    path = "/api/budget/categories",
    tag = "Budget",
    responses(
        (status = 200, description = "Categories, alphabetical", body = [BudgetCategory]),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[get("/budget/categories")]
pub async fn list_categories(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let categories: Vec<BudgetCategory> = pool
        .list_categories(auth.user_id())
        .await?
        .into_iter()
        .map(BudgetCategory::from)
        .collect();
    Ok(HttpResponse::Ok().json(categories))
}

#[utoipa::path(
    post,
    path = "/api/budget/categories",
    tag = "Budget",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Created", body = BudgetCategory),
        (status = 400, description = "Category name cannot be empty", body = ErrorResponse),
        (status = 409, description = "Category already exists", body = ErrorResponse)
    )
)]
#[post("/budget/categories")]
pub async fn create_category(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let name = category_name(&body)?;
    let created = pool.insert_category(auth.user_id(), name).await?;
    Ok(HttpResponse::Created().json(BudgetCategory::from(created)))
}

#[utoipa::path(
    put,
    path = "/api/budget/categories/{id}",
    tag = "Budget",
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Renamed", body = BudgetCategory),
        (status = 400, description = "Category name cannot be empty", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Category already exists", body = ErrorResponse)
    )
)]
#[put("/budget/categories/{id}")]
pub async fn rename_category(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    path: web::Path<String>,
    body: web::Json<CategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, "category")?;
    let name = category_name(&body)?;
    let renamed = pool.rename_category(id, auth.user_id(), name).await?;
    Ok(HttpResponse::Ok().json(BudgetCategory::from(renamed)))
}

#[utoipa::path(
    get,
    path = "/api/budget/transactions",
    tag = "Budget",
    responses(
        (status = 200, description = "Transactions, newest date first", body = [BudgetTransaction]),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    )
)]
#[get("/budget/transactions")]
pub async fn list_transactions(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(pool.list_transactions(auth.user_id()).await?))
}

/// Assign a category to a transaction, or clear it with `category_id: null`.
#[utoipa::path(
    put,
    path = "/api/budget/transactions/category",
    tag = "Budget",
    request_body = UpdateTransactionCategoryRequest,
    responses(
        (status = 200, description = "Updated", body = StatusResponse),
        (status = 403, description = "Transaction owned by another user", body = ErrorResponse),
        (status = 404, description = "Transaction or category not found", body = ErrorResponse)
    )
)]
#[put("/budget/transactions/category")]
pub async fn update_transaction_category(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<UpdateTransactionCategoryRequest>,
) -> AppResult<HttpResponse> {
    pool.set_transaction_category(body.transaction_id, body.category_id, auth.user_id())
        .await?;
    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// Import many transactions at once; all rows or none are stored.
#[utoipa::path(
    post,
    path = "/api/budget/transactions/bulk",
    tag = "Budget",
    request_body = BulkImportRequest,
    responses(
        (status = 201, description = "Imported", body = BulkImportResponse),
        (status = 400, description = "No transactions to import", body = ErrorResponse),
        (status = 500, description = "A row failed; nothing was imported", body = ErrorResponse)
    )
)]
#[post("/budget/transactions/bulk")]
pub async fn bulk_import(
    auth: SessionAuth,
    pool: web::Data<DbPool>,
    body: web::Json<BulkImportRequest>,
) -> AppResult<HttpResponse> {
    if body.transactions.is_empty() {
        return Err(AppError::InvalidInput(
            "No transactions to import".to_string(),
        ));
    }

    let count = pool
        .import_transactions(auth.user_id(), &body.transactions)
        .await?;
    info!(user_id = auth.user_id(), count, "Imported budget transactions");

    Ok(HttpResponse::Created().json(BulkImportResponse {
        status: "success".to_string(),
        message: "Successfully imported transactions".to_string(),
        count,
    }))
}
