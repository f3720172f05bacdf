//! Repository implementations for database access
//!
//! Each repository borrows the connection of an open `UnitOfWork`:
//! - Single statement per operation, RETURNING the affected row
//! - Unique violations become `DbError::Conflict`
//! - Lookups that match nothing become `DbError::NotFound`

pub mod vessels;
pub mod equipment;

use sqlx::{Sqlite, SqlitePool, Transaction};

pub use vessels::{Vessel, VesselRepo};
pub use equipment::{Equipment, EquipmentRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {resource} '{key}' already exists")]
    Conflict { resource: &'static str, key: String },
}

impl DbError {
    /// Map a unique-constraint failure to `Conflict`, anything else to `Sqlx`.
    pub(crate) fn on_unique(err: sqlx::Error, resource: &'static str, key: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict {
                resource,
                key: key.to_owned(),
            },
            _ => Self::Sqlx(err),
        }
    }
}

/// One request's transaction scope.
///
/// Dropping without `commit()` rolls back and returns the connection to
/// the pool, so every `?` exit in a handler is a rollback.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub async fn begin(pool: &SqlitePool) -> Result<Self, DbError> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    pub fn vessels(&mut self) -> VesselRepo<'_> {
        VesselRepo::new(&mut *self.tx)
    }

    pub fn equipment(&mut self) -> EquipmentRepo<'_> {
        EquipmentRepo::new(&mut *self.tx)
    }

    pub async fn commit(self) -> Result<(), DbError> {
        self.tx.commit().await?;
        Ok(())
    }
}
