//! Liveness and readiness checks for the VibeCoders server.
//!
//! `/api/health` only proves the process answers HTTP. `/api/ready` also
//! requires the SQLite file to answer and to carry the migrated schema, so
//! a deployment that skipped `vibecoders-admin migrate` reports 503.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::error::ErrorResponse;

const SERVICE_NAME: &str = "vibecoders";

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    status: &'static str,
    database: &'static str,
    schema: &'static str,
}

/// Process liveness with the running build's version.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server process is up", body = HealthResponse)
    )
)]
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/api/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable and migrated", body = ReadyResponse),
        (status = 503, description = "Store unreachable or schema missing", body = ErrorResponse)
    )
)]
#[get("/ready")]
pub async fn ready(pool: web::Data<DbPool>) -> HttpResponse {
    if let Err(e) = pool.ping().await {
        warn!("Readiness: database unreachable: {}", e);
        return unavailable("Database connection failed");
    }
    if let Err(e) = pool.check_schema().await {
        warn!("Readiness: schema missing: {}", e);
        return unavailable("Database schema missing; run `vibecoders-admin migrate`");
    }

    HttpResponse::Ok().json(ReadyResponse {
        status: "ready",
        database: "connected",
        schema: "migrated",
    })
}

fn unavailable(reason: &str) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: reason.to_string(),
    })
}

pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
