//! Database connection pool management
//!
//! One SQLite file, opened through an sqlx pool with explicit limits.
//! The file (and its parent directory) is created when missing.

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "fpso_db.db";

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database location and pool sizing
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Create a SQLite connection pool.
///
/// Foreign-key enforcement is left off: `equipment.vessel_code` may hold
/// codes with no matching vessel (including the insert default).
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// database cannot be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::at("fpso_db.db")).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(false);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}
