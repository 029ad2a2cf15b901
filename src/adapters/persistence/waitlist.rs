use async_trait::async_trait;
use chrono::DateTime;
use sqlx::{Row, sqlite::SqliteRow};

use crate::{
    adapters::persistence::{SqlitePersistence, parse_id},
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::WaitlistRepo,
    domain::entities::waitlist_entry::WaitlistEntry,
};

fn row_to_entry(row: SqliteRow) -> AppResult<WaitlistEntry> {
    let id: String = row.try_get("id")?;
    let created_at: i64 = row.try_get("created_at")?;
    let created_at = DateTime::from_timestamp(created_at, 0)
        .ok_or_else(|| AppError::Storage("Stored created_at is out of range".into()))?;

    Ok(WaitlistEntry {
        id: parse_id(&id)?,
        email: row.try_get("email")?,
        clinic_name: row.try_get("clinic_name")?,
        clinic_size: row.try_get("clinic_size")?,
        created_at,
    })
}

#[async_trait]
impl WaitlistRepo for SqlitePersistence {
    async fn insert(&self, entry: &WaitlistEntry) -> AppResult<WaitlistEntry> {
        // The UNIQUE index on email settles races between concurrent inserts.
        let row = sqlx::query(
            r#"
            INSERT INTO waitlist (id, email, clinic_name, clinic_size, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, email, clinic_name, clinic_size, created_at
            "#,
        )
        .bind(entry.id.to_string())
        .bind(&entry.email)
        .bind(&entry.clinic_name)
        .bind(&entry.clinic_size)
        .bind(entry.created_at.timestamp())
        .fetch_one(self.pool())
        .await
        .map_err(|err| match AppError::from(err) {
            AppError::Conflict(_) => AppError::DuplicateEmail,
            other => other,
        })?;

        row_to_entry(row)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, clinic_name, clinic_size, created_at
            FROM waitlist
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;

        row.map(row_to_entry).transpose()
    }

    async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM waitlist")
            .fetch_one(self.pool())
            .await
            .map_err(AppError::from)?;

        Ok(row.try_get("count")?)
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, clinic_name, clinic_size, created_at
            FROM waitlist
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)?;

        rows.into_iter().map(row_to_entry).collect()
    }
}
