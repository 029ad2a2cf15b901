use std::sync::Arc;

use crate::{
    application::use_cases::{user::UserRepo, waitlist::WaitlistUseCases},
    infra::{RateLimiterTrait, config::AppConfig},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub waitlist_use_cases: Arc<WaitlistUseCases>,
    pub user_repo: Arc<dyn UserRepo>,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}
