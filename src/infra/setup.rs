use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::WaitlistUseCases,
    infra::{
        InfraError, RateLimiterTrait,
        config::AppConfig,
        init_storage,
        rate_limit::{LocalRateLimiter, RedisRateLimiter},
    },
};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let storage = init_storage(&config).await?;

    let rate_limiter: Arc<dyn RateLimiterTrait> = match &config.redis_url {
        Some(redis_url) => Arc::new(
            RedisRateLimiter::new(
                redis_url,
                config.rate_limit_window_secs,
                config.rate_limit_per_ip,
            )
            .await?,
        ),
        None => Arc::new(LocalRateLimiter::new(
            config.rate_limit_window_secs,
            config.rate_limit_per_ip,
        )),
    };

    let waitlist_use_cases = WaitlistUseCases::new(storage.waitlist.clone());

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        user_repo: storage.users,
        rate_limiter,
    })
}

pub fn init_tracing(log_file: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "curaone_waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs); skipped when the file can't be created
    let json_layer = File::create(log_file).ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    let file_disabled = json_layer.is_none();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    if file_disabled {
        tracing::warn!(path = %log_file.display(), "Cannot create log file, JSON file logging disabled");
    }
}
