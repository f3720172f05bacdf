//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections) - no process-wide handle
//! - One transaction per request via `UnitOfWork`
//! - Rely on DB unique constraints, map violations to conflicts - no check-then-insert

pub mod pool;
pub mod repos;
pub mod schema;

use sqlx::SqlitePool;

pub use pool::{create_pool, DatabaseConfig, DEFAULT_DB_PATH};
pub use repos::*;
pub use schema::ensure_schema;

/// Open the database file, creating it and its tables when absent.
pub async fn open(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    tracing::info!(path = %config.path.display(), "opening database");
    let pool = create_pool(config).await?;
    ensure_schema(&pool).await?;
    Ok(pool)
}
