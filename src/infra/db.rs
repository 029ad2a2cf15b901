use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

use super::InfraError;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
  id TEXT PRIMARY KEY DEFAULT (lower(hex(randomblob(16)))),
  username TEXT NOT NULL UNIQUE,
  password TEXT NOT NULL
)
"#;

const CREATE_WAITLIST_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS waitlist (
  id TEXT PRIMARY KEY DEFAULT (lower(hex(randomblob(16)))),
  email TEXT NOT NULL UNIQUE,
  clinic_name TEXT NOT NULL,
  clinic_size TEXT NOT NULL,
  created_at INTEGER NOT NULL DEFAULT (unixepoch())
)
"#;

/// An in-memory SQLite database lives only as long as its connection.
fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

pub async fn init_db(database_url: &str) -> Result<SqlitePool, InfraError> {
    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(InfraError::DatabaseConnection)?
        .create_if_missing(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options
        .connect_with(connect_options)
        .await
        .map_err(InfraError::DatabaseConnection)?;

    init_schema(&pool).await?;

    info!(in_memory = is_in_memory(database_url), "Connected to database!");
    Ok(pool)
}

async fn init_schema(pool: &SqlitePool) -> Result<(), InfraError> {
    for statement in [CREATE_USERS_TABLE, CREATE_WAITLIST_TABLE] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(InfraError::DatabaseConnection)?;
    }
    Ok(())
}
