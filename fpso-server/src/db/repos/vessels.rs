//! Vessel repository

use sqlx::{FromRow, SqliteConnection};

use super::DbError;
use crate::models::VesselCode;

/// Vessel record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Vessel {
    pub id: i64,
    pub code: String,
}

/// Vessel repository
pub struct VesselRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> VesselRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a vessel. A taken code is a `Conflict`, nothing is written.
    pub async fn create(&mut self, code: &VesselCode) -> Result<Vessel, DbError> {
        let vessel = sqlx::query_as::<_, Vessel>(
            "INSERT INTO vessel (code) VALUES (?) RETURNING id, code",
        )
        .bind(code.as_str())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| DbError::on_unique(e, "Vessel", code.as_str()))?;

        tracing::info!(id = vessel.id, code = %vessel.code, "vessel inserted");
        Ok(vessel)
    }

    pub async fn list(&mut self) -> Result<Vec<Vessel>, DbError> {
        let vessels = sqlx::query_as::<_, Vessel>("SELECT id, code FROM vessel ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(vessels)
    }

    pub async fn get(&mut self, id: i64) -> Result<Vessel, DbError> {
        sqlx::query_as::<_, Vessel>("SELECT id, code FROM vessel WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Overwrite the business code of a vessel.
    ///
    /// Equipment referencing the old code is left untouched.
    pub async fn update_code(&mut self, id: i64, code: &VesselCode) -> Result<Vessel, DbError> {
        let vessel = sqlx::query_as::<_, Vessel>(
            "UPDATE vessel SET code = ? WHERE id = ? RETURNING id, code",
        )
        .bind(code.as_str())
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| DbError::on_unique(e, "Vessel", code.as_str()))?
        .ok_or_else(|| not_found(id))?;

        tracing::info!(id, code = %vessel.code, "vessel code updated");
        Ok(vessel)
    }

    /// Delete a vessel, returning its last stored values.
    pub async fn delete(&mut self, id: i64) -> Result<Vessel, DbError> {
        let vessel = sqlx::query_as::<_, Vessel>(
            "DELETE FROM vessel WHERE id = ? RETURNING id, code",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| not_found(id))?;

        tracing::info!(id, code = %vessel.code, "vessel deleted");
        Ok(vessel)
    }
}

fn not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: "Vessel",
        id: id.to_string(),
    }
}
