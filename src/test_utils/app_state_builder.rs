//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by the in-memory store,
//! optionally seeded with entries or swapped for a failing repo.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;

use crate::{
    adapters::{http::app_state::AppState, memory::InMemoryPersistence},
    app_error::{AppError, AppResult},
    application::use_cases::{
        user::UserRepo,
        waitlist::{WaitlistRepo, WaitlistUseCases},
    },
    domain::entities::waitlist_entry::WaitlistEntry,
    infra::{RateLimiterTrait, config::AppConfig, rate_limit::LocalRateLimiter},
    test_utils::test_config,
};

// ============================================================================
// Stub Implementations
// ============================================================================

/// Waitlist repo whose backing store is unreachable.
#[derive(Default)]
pub struct FailingWaitlistRepo;

#[async_trait]
impl WaitlistRepo for FailingWaitlistRepo {
    async fn insert(&self, _entry: &WaitlistEntry) -> AppResult<WaitlistEntry> {
        Err(AppError::Storage("database is locked".into()))
    }

    async fn get_by_email(&self, _email: &str) -> AppResult<Option<WaitlistEntry>> {
        Err(AppError::Storage("database is locked".into()))
    }

    async fn count(&self) -> AppResult<i64> {
        Err(AppError::Storage("database is locked".into()))
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        Err(AppError::Storage("database is locked".into()))
    }
}

// ============================================================================
// TestAppStateBuilder
// ============================================================================

/// Builder for creating `AppState` with in-memory dependencies for testing.
///
/// # Example
///
/// ```ignore
/// let app_state = TestAppStateBuilder::new()
///     .with_entry(create_test_entry(|e| e.email = "a@x.com".into()))
///     .with_listing_enabled()
///     .build();
/// ```
pub struct TestAppStateBuilder {
    config: AppConfig,
    entries: Vec<WaitlistEntry>,
    waitlist_repo: Option<Arc<dyn WaitlistRepo>>,
    rate_limiter: Option<Arc<dyn RateLimiterTrait>>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            config: test_config(|_| {}),
            entries: vec![],
            waitlist_repo: None,
            rate_limiter: None,
        }
    }

    /// Seed the in-memory store with an entry.
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_listing_enabled(mut self) -> Self {
        self.config.listing_enabled = true;
        self
    }

    pub fn with_public_dir(mut self, dir: PathBuf) -> Self {
        self.config.public_dir = Some(dir);
        self
    }

    /// Replace the waitlist store entirely (seeded entries are then ignored).
    pub fn with_waitlist_repo(mut self, repo: Arc<dyn WaitlistRepo>) -> Self {
        self.waitlist_repo = Some(repo);
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiterTrait>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    pub fn build(self) -> AppState {
        let memory = Arc::new(InMemoryPersistence::with_entries(self.entries));

        let waitlist_repo = self
            .waitlist_repo
            .unwrap_or_else(|| memory.clone() as Arc<dyn WaitlistRepo>);
        let rate_limiter = self
            .rate_limiter
            .unwrap_or_else(|| Arc::new(LocalRateLimiter::permissive()));

        AppState {
            config: Arc::new(self.config),
            waitlist_use_cases: Arc::new(WaitlistUseCases::new(waitlist_repo)),
            user_repo: memory as Arc<dyn UserRepo>,
            rate_limiter,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
