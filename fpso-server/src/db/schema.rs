//! Table definitions, created idempotently at start-up

use sqlx::SqlitePool;

/// Both tables and their lookup indexes.
///
/// AUTOINCREMENT keeps ids from being reused after a delete.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS vessel (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code VARCHAR(5) NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS equipment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(12) NOT NULL,
    code VARCHAR(8) NOT NULL UNIQUE,
    location VARCHAR(3) NOT NULL,
    status VARCHAR(12) NOT NULL,
    vessel_code VARCHAR(5) REFERENCES vessel(code)
);

CREATE INDEX IF NOT EXISTS idx_equipment_status ON equipment(status);
CREATE INDEX IF NOT EXISTS idx_equipment_vessel_code ON equipment(vessel_code);
"#;

/// Create the `vessel` and `equipment` tables if absent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, DatabaseConfig};

    #[tokio::test]
    async fn schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&DatabaseConfig::at(dir.path().join("fpso.db")))
            .await
            .unwrap();

        ensure_schema(&pool).await.expect("first run");
        ensure_schema(&pool).await.expect("second run");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('vessel', 'equipment') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec![("equipment".to_string(),), ("vessel".to_string(),)]
        );
    }
}
