use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::{Row, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    adapters::persistence::{SqlitePersistence, parse_id},
    app_error::{AppError, AppResult},
    application::use_cases::user::UserRepo,
    domain::entities::user::{NewUser, User},
};

fn row_to_user(row: SqliteRow) -> AppResult<User> {
    let id: String = row.try_get("id")?;
    let password: String = row.try_get("password")?;

    Ok(User {
        id: parse_id(&id)?,
        username: row.try_get("username")?,
        password: SecretString::from(password),
    })
}

#[async_trait]
impl UserRepo for SqlitePersistence {
    async fn create(&self, new_user: &NewUser) -> AppResult<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, username, password)
            VALUES (?, ?, ?)
            RETURNING id, username, password
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&new_user.username)
        .bind(new_user.password.expose_secret())
        .fetch_one(self.pool())
        .await
        .map_err(|err| match AppError::from(err) {
            AppError::Conflict(_) => AppError::Conflict("Username already taken".into()),
            other => other,
        })?;

        row_to_user(row)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        // Ids written by the column default have no hyphens.
        let row = sqlx::query("SELECT id, username, password FROM users WHERE id = ? OR id = ?")
            .bind(id.to_string())
            .bind(id.simple().to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;

        row.map(row_to_user).transpose()
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;

        row.map(row_to_user).transpose()
    }
}
