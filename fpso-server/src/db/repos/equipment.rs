//! Equipment repository
//!
//! Handles inserts, status filters, the vessel join and deactivation:
//! - deactivate: single UPDATE ... RETURNING, idempotent
//! - deactivate_many: one UPDATE over a JSON array of codes, unknown codes are skipped

use sqlx::types::Json;
use sqlx::{FromRow, SqliteConnection};

use super::DbError;
use crate::models::{NewEquipment, STATUS_INACTIVE};

const COLUMNS: &str = "id, name, code, location, status, vessel_code";

/// Equipment record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub location: String,
    pub status: String,
    pub vessel_code: Option<String>,
}

/// Equipment repository
pub struct EquipmentRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> EquipmentRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert equipment. A taken code is a `Conflict`, nothing is written.
    pub async fn create(&mut self, new: &NewEquipment) -> Result<Equipment, DbError> {
        let equipment = sqlx::query_as::<_, Equipment>(&format!(
            "INSERT INTO equipment (name, code, location, status, vessel_code) \
             VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.code)
        .bind(&new.location)
        .bind(&new.status)
        .bind(new.vessel_code.as_deref())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| DbError::on_unique(e, "Equipment", &new.code))?;

        tracing::info!(
            id = equipment.id,
            code = %equipment.code,
            vessel_code = ?equipment.vessel_code,
            "equipment inserted"
        );
        Ok(equipment)
    }

    pub async fn list(&mut self) -> Result<Vec<Equipment>, DbError> {
        let rows = sqlx::query_as::<_, Equipment>(&format!(
            "SELECT {COLUMNS} FROM equipment ORDER BY id"
        ))
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Exact, case-sensitive match on `status`.
    pub async fn list_by_status(&mut self, status: &str) -> Result<Vec<Equipment>, DbError> {
        let rows = sqlx::query_as::<_, Equipment>(&format!(
            "SELECT {COLUMNS} FROM equipment WHERE status = ? ORDER BY id"
        ))
        .bind(status)
        .fetch_all(&mut *self.conn)
        .await?;

        tracing::debug!(status, count = rows.len(), "equipment filtered by status");
        Ok(rows)
    }

    /// Equipment mounted on the vessel with `vessel_id`, joined on the
    /// vessel's business code.
    pub async fn list_by_vessel(&mut self, vessel_id: i64) -> Result<Vec<Equipment>, DbError> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT e.id, e.name, e.code, e.location, e.status, e.vessel_code
            FROM equipment e
            JOIN vessel v ON v.code = e.vessel_code
            WHERE v.id = ?
            ORDER BY e.id
            "#,
        )
        .bind(vessel_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Set `status` to inactive on the equipment with `code`.
    pub async fn deactivate(&mut self, code: &str) -> Result<Equipment, DbError> {
        let equipment = sqlx::query_as::<_, Equipment>(&format!(
            "UPDATE equipment SET status = ? WHERE code = ? RETURNING {COLUMNS}"
        ))
        .bind(STATUS_INACTIVE)
        .bind(code)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "Equipment",
            id: code.to_owned(),
        })?;

        tracing::info!(code, "equipment deactivated");
        Ok(equipment)
    }

    /// Set `status` to inactive on every equipment whose code is listed.
    ///
    /// Returns the updated rows ordered by id.
    pub async fn deactivate_many(&mut self, codes: &[String]) -> Result<Vec<Equipment>, DbError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        // One JSON parameter instead of one bind per code: SQLite caps
        // bind parameters at 32766.
        let mut rows = sqlx::query_as::<_, Equipment>(&format!(
            "UPDATE equipment SET status = ? \
             WHERE code IN (SELECT value FROM json_each(?)) RETURNING {COLUMNS}"
        ))
        .bind(STATUS_INACTIVE)
        .bind(Json(codes))
        .fetch_all(&mut *self.conn)
        .await?;
        rows.sort_by_key(|e| e.id);

        tracing::info!(
            requested = codes.len(),
            updated = rows.len(),
            "equipment batch deactivated"
        );
        Ok(rows)
    }

    /// Clear `vessel_code` on all equipment pointing at `vessel_code`.
    ///
    /// Returns the number of rows detached.
    pub async fn detach_from_vessel(&mut self, vessel_code: &str) -> Result<u64, DbError> {
        let result = sqlx::query("UPDATE equipment SET vessel_code = NULL WHERE vessel_code = ?")
            .bind(vessel_code)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open, DatabaseConfig, UnitOfWork};
    use crate::models::{VesselCode, DEFAULT_VESSEL_CODE};

    async fn pool() -> (tempfile::TempDir, sqlx::SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = open(&DatabaseConfig::at(dir.path().join("fpso.db")))
            .await
            .unwrap();
        (dir, pool)
    }

    fn new_equipment(code: &str, vessel_code: Option<&str>) -> NewEquipment {
        NewEquipment {
            name: "Pump".into(),
            code: code.into(),
            location: "BRA".into(),
            status: "active".into(),
            vessel_code: vessel_code.map(str::to_owned),
        }
    }

    #[tokio::test]
    async fn batch_skips_unknown_codes() {
        let (_dir, pool) = pool().await;
        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        uow.equipment().create(&new_equipment("E1", None)).await.unwrap();
        uow.equipment().create(&new_equipment("E2", None)).await.unwrap();
        uow.equipment().create(&new_equipment("E3", None)).await.unwrap();

        let updated = uow
            .equipment()
            .deactivate_many(&["E2".into(), "E1".into(), "NOPE".into()])
            .await
            .unwrap();
        uow.commit().await.unwrap();

        let codes: Vec<_> = updated.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, ["E1", "E2"]);
        assert!(updated.iter().all(|e| e.status == STATUS_INACTIVE));

        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        let active = uow.equipment().list_by_status("active").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code, "E3");
    }

    #[tokio::test]
    async fn batch_larger_than_bind_limit() {
        let (_dir, pool) = pool().await;
        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        uow.equipment().create(&new_equipment("E1", None)).await.unwrap();
        uow.equipment().create(&new_equipment("E2", None)).await.unwrap();

        // SQLite allows at most 32766 bind parameters per statement
        let mut codes: Vec<String> = (0..40_000).map(|i| format!("X{i}")).collect();
        codes.push("E2".into());

        let updated = uow.equipment().deactivate_many(&codes).await.unwrap();
        uow.commit().await.unwrap();

        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].code, "E2");
        assert_eq!(updated[0].status, STATUS_INACTIVE);
    }

    #[tokio::test]
    async fn empty_batch_is_noop() {
        let (_dir, pool) = pool().await;
        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        assert!(uow.equipment().deactivate_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_filter_is_case_sensitive() {
        let (_dir, pool) = pool().await;
        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        uow.equipment().create(&new_equipment("E1", None)).await.unwrap();

        assert_eq!(uow.equipment().list_by_status("active").await.unwrap().len(), 1);
        assert!(uow.equipment().list_by_status("ACTIVE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sentinel_vessel_code_is_stored_without_a_vessel() {
        let (_dir, pool) = pool().await;
        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        let e = uow
            .equipment()
            .create(&new_equipment("E1", Some(DEFAULT_VESSEL_CODE)))
            .await
            .unwrap();
        assert_eq!(e.vessel_code.as_deref(), Some("active"));
    }

    #[tokio::test]
    async fn join_and_detach() {
        let (_dir, pool) = pool().await;
        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        let vessel = uow
            .vessels()
            .create(&VesselCode::new("V001").unwrap())
            .await
            .unwrap();
        uow.equipment().create(&new_equipment("E1", Some("V001"))).await.unwrap();
        uow.equipment().create(&new_equipment("E2", Some("V002"))).await.unwrap();

        let mounted = uow.equipment().list_by_vessel(vessel.id).await.unwrap();
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].code, "E1");

        assert_eq!(uow.equipment().detach_from_vessel("V001").await.unwrap(), 1);
        assert!(uow.equipment().list_by_vessel(vessel.id).await.unwrap().is_empty());
    }
}
