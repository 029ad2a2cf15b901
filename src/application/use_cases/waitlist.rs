use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

// ============================================================================
// Repository Trait
// ============================================================================

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Store a fully formed entry.
    ///
    /// Must fail with `AppError::DuplicateEmail` without mutating anything when
    /// an entry with the same email already exists, even if that entry was
    /// inserted concurrently after the caller's own lookup.
    async fn insert(&self, entry: &WaitlistEntry) -> AppResult<WaitlistEntry>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>>;

    async fn count(&self) -> AppResult<i64>;

    /// All entries, newest first.
    async fn list(&self) -> AppResult<Vec<WaitlistEntry>>;
}

// ============================================================================
// Use Cases
// ============================================================================

/// The waitlist registry: one entry per email, ids and timestamps issued here.
#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
}

impl WaitlistUseCases {
    pub fn new(repo: Arc<dyn WaitlistRepo>) -> Self {
        Self { repo }
    }

    /// Add a candidate to the waitlist.
    ///
    /// The lookup only short-circuits the common case. The repo's insert is
    /// what makes two concurrent registrations of one email yield a single
    /// entry.
    pub async fn register(&self, candidate: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        if self.repo.get_by_email(&candidate.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        // Whole seconds, so every store hands back the same value it was given.
        let created_at = Utc::now().trunc_subsecs(0);
        let entry = candidate.into_entry(Uuid::new_v4(), created_at);

        self.repo.insert(&entry).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repo.count().await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        self.repo.get_by_email(email).await
    }

    pub async fn list_entries(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.repo.list().await
    }
}
