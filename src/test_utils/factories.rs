//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use std::{net::SocketAddr, path::PathBuf};

use axum::http::HeaderValue;
use chrono::{SubsecRound, Utc};
use secrecy::SecretString;
use uuid::Uuid;

use crate::{
    domain::entities::{
        user::NewUser,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    },
    infra::config::{AppConfig, StorageBackend},
};

/// Create a validated waitlist candidate with sensible defaults.
pub fn create_test_candidate(overrides: impl FnOnce(&mut NewWaitlistEntry)) -> NewWaitlistEntry {
    let mut candidate = NewWaitlistEntry {
        email: format!("clinic-{}@example.com", Uuid::new_v4().simple()),
        clinic_name: "Riverside Family Clinic".to_string(),
        clinic_size: "6-20".to_string(),
    };
    overrides(&mut candidate);
    candidate
}

/// Create a stored waitlist entry with a fresh id and a whole-second timestamp.
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = create_test_candidate(|_| {}).into_entry(Uuid::new_v4(), Utc::now().trunc_subsecs(0));
    overrides(&mut entry);
    entry
}

pub fn create_test_new_user(overrides: impl FnOnce(&mut NewUser)) -> NewUser {
    let mut user = NewUser {
        username: format!("user-{}", Uuid::new_v4().simple()),
        password: SecretString::from("correct horse".to_string()),
    };
    overrides(&mut user);
    user
}

/// Config for tests: in-memory storage, local rate limiting, listing off.
pub fn test_config(overrides: impl FnOnce(&mut AppConfig)) -> AppConfig {
    let mut config = AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origin: HeaderValue::from_static("http://localhost:5000"),
        storage_backend: StorageBackend::Memory,
        database_url: "sqlite::memory:".to_string(),
        redis_url: None,
        rate_limit_window_secs: 60,
        rate_limit_per_ip: u64::MAX,
        trust_proxy: false,
        listing_enabled: false,
        public_dir: None,
        log_file: PathBuf::from("test.log"),
    };
    overrides(&mut config);
    config
}
