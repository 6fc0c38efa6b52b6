//! Database module providing connection management and queries.
//!
//! Queries live in per-area files as `impl DbPool` blocks.

pub mod budget;
pub mod forum;
pub mod magic_links;
pub mod projects;
pub mod prompts;
pub mod sessions;
pub mod users;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Row offset of a 1-based page, clamped to what SQLite accepts.
///
/// Pages past the end yield an empty result rather than an overflow.
pub(crate) fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1)
        .saturating_mul(page_size)
        .min(i64::MAX as u64)
}

/// Database connection pool wrapper.
#[derive(Clone, Debug)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Open the configured SQLite file.
    ///
    /// Fails when the file does not exist; the schema is never created here.
    pub async fn new(config: &Config) -> AppResult<Self> {
        if !config.database_path.is_file() {
            return Err(AppError::Database(format!(
                "Database file not found: {}",
                config.database_path.display()
            )));
        }

        Self::connect(&config.database_url(false), config.db_max_connections).await
    }

    /// Connect to an arbitrary SQLite URL (e.g. `sqlite::memory:` in tests).
    pub async fn connect(url: &str, max_connections: u32) -> AppResult<Self> {
        let mut opts = ConnectOptions::new(url.to_owned());
        opts.max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Get access to the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending schema migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Round-trip a trivial statement to confirm the store is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1"))
            .await?;
        Ok(())
    }

    /// Fail unless the schema created by `vibecoders-admin migrate` is present.
    pub async fn check_schema(&self) -> AppResult<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT COUNT(*) FROM users"))
            .await?;
        Ok(())
    }
}
