use sqlx::SqlitePool;
use uuid::Uuid;

use crate::app_error::AppError;

pub mod user;
pub mod waitlist;

#[derive(Clone)]
pub struct SqlitePersistence {
    pool: SqlitePool,
}

impl SqlitePersistence {
    pub fn new(pool: SqlitePool) -> Self {
        SqlitePersistence { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Parse an id column. Accepts both the hyphenated form the registry writes
/// and the bare 32-hex form produced by the column default.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|err| {
        tracing::error!(raw_id = %raw, error = %err, "Stored id is not a UUID");
        AppError::Storage("Stored row has a malformed id".into())
    })
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A record with this value already exists".into())
            }
            _ => {
                // Log the actual error for debugging, but don't expose details
                tracing::error!(error = ?err, "Database error");
                AppError::Storage("Database operation failed".into())
            }
        }
    }
}
