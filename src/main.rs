//! VibeCoders server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vibecoders_lib::api;
use vibecoders_lib::config::Config;
use vibecoders_lib::db::DbPool;
use vibecoders_lib::middleware::RequestLogger;
use vibecoders_lib::services::PageRenderer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("Check RUST_ENV, VC_PORT and VC_DB_MAX_CONNECTIONS");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  VibeCoders Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("{}", e);
            error!("Create the schema first with `vibecoders-admin migrate`");
            std::process::exit(1);
        }
    };
    info!(path = %config.database_path.display(), "Database opened");

    let renderer = match PageRenderer::load() {
        Ok(renderer) => renderer,
        Err(e) => {
            error!("Failed to load page templates: {}", e);
            std::process::exit(1);
        }
    };

    let bind_address = config.bind_address();
    let is_development = config.is_development();
    let cors_origins = config.cors_origins.clone();

    let worker_count = if is_development { 4 } else { num_cpus::get() };
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );

    let pool = web::Data::new(pool);
    let renderer = web::Data::new(renderer);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        // Same-origin only in production
        if is_development {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
            cors = cors.supports_credentials();
        }

        App::new()
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(pool.clone())
            .app_data(renderer.clone())
            .configure(api::configure_routes)
            .configure(api::configure_page_routes)
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}
