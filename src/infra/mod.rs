use std::sync::Arc;

use tracing::info;

use crate::{
    adapters::{memory::InMemoryPersistence, persistence::SqlitePersistence},
    application::use_cases::{user::UserRepo, waitlist::WaitlistRepo},
    infra::{
        config::{AppConfig, StorageBackend},
        db::init_db,
    },
};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod rate_limit;
pub mod setup;

pub use error::InfraError;
pub use rate_limit::RateLimiterTrait;

/// The store chosen at startup, seen through its ports.
#[derive(Clone)]
pub struct Storage {
    pub waitlist: Arc<dyn WaitlistRepo>,
    pub users: Arc<dyn UserRepo>,
}

pub async fn sqlite_persistence(database_url: &str) -> Result<SqlitePersistence, InfraError> {
    let pool = init_db(database_url).await?;
    Ok(SqlitePersistence::new(pool))
}

pub async fn init_storage(config: &AppConfig) -> Result<Storage, InfraError> {
    let storage = match config.storage_backend {
        StorageBackend::Memory => {
            let memory = Arc::new(InMemoryPersistence::new());
            Storage {
                waitlist: memory.clone() as Arc<dyn WaitlistRepo>,
                users: memory as Arc<dyn UserRepo>,
            }
        }
        StorageBackend::Sqlite => {
            let sqlite = Arc::new(sqlite_persistence(&config.database_url).await?);
            Storage {
                waitlist: sqlite.clone() as Arc<dyn WaitlistRepo>,
                users: sqlite as Arc<dyn UserRepo>,
            }
        }
    };

    info!(backend = %config.storage_backend, "Storage initialized");
    Ok(storage)
}
