use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    app_error::AppResult,
    domain::entities::user::{NewUser, User},
};

/// Storage for account records. Usernames are unique; a clash is reported as
/// `AppError::Conflict`.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, new_user: &NewUser) -> AppResult<User>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>>;
}
