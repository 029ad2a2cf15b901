use std::{net::SocketAddr, path::PathBuf};

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use strum::{Display, EnumString};

/// Which store backs the waitlist registry for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    /// Process-lifetime map; empty on every start.
    Memory,
    /// SQLite through sqlx, durable unless DATABASE_URL points at memory.
    Sqlite,
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub storage_backend: StorageBackend,
    pub database_url: String,
    /// When set, rate limit counters live in Redis instead of this process.
    pub redis_url: Option<String>,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    /// Whether to trust X-Forwarded-For headers. Set to true when behind a reverse proxy.
    /// SECURITY: Only enable this when the API is not directly exposed to the internet.
    pub trust_proxy: bool,
    /// Exposes every entry, emails included, on GET /api/waitlist.
    pub listing_enabled: bool,
    /// Built landing page served for every non-API path.
    pub public_dir: Option<PathBuf>,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 5000)),
        );
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:5000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");
        let storage_backend: StorageBackend =
            get_env_default("STORAGE_BACKEND", StorageBackend::Sqlite);
        let database_url: String =
            get_env_default("DATABASE_URL", "sqlite::memory:".to_string());
        let redis_url: Option<String> = std::env::var("REDIS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let rate_limit_window_secs: u64 = get_env_default("RATE_LIMIT_WINDOW_SECS", 60);
        let rate_limit_per_ip: u64 = get_env_default("RATE_LIMIT_PER_IP", 30);
        // Default to false for security - must explicitly enable when behind a trusted proxy
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);
        let listing_enabled: bool = get_env_default("WAITLIST_LISTING_ENABLED", false);
        let public_dir: Option<PathBuf> = std::env::var("PUBLIC_DIR").ok().map(PathBuf::from);
        let log_file: PathBuf = get_env_default("LOG_FILE", PathBuf::from("app.log"));

        Self {
            bind_addr,
            cors_origin,
            storage_backend,
            database_url,
            redis_url,
            rate_limit_window_secs,
            rate_limit_per_ip,
            trust_proxy,
            listing_enabled,
            public_dir,
            log_file,
        }
    }
}
