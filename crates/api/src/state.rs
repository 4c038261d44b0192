use std::sync::Arc;

use ambassadors_core::rate_limit::{RateLimitStore, RateLimiter};
use ambassadors_db::repositories::Repositories;
use ambassadors_db::DbPool;

use crate::config::ServerConfig;
use crate::services::Services;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Business-logic layer over the injected repositories.
    pub services: Services,
    /// Database pool, `None` when running on in-memory repositories.
    pub pool: Option<DbPool>,
    /// Limiter applied to every `/api` request.
    pub global_limiter: RateLimiter,
    /// Stricter limiter applied to vote submissions.
    pub vote_limiter: RateLimiter,
}

impl AppState {
    /// Wire services and limiters. Both limiters share `limit_store`; their
    /// key prefixes keep the counters apart.
    pub fn new(
        config: ServerConfig,
        repositories: Repositories,
        pool: Option<DbPool>,
        limit_store: Arc<dyn RateLimitStore>,
    ) -> Self {
        let global_limiter = RateLimiter::new(config.global_rate_limit(), limit_store.clone());
        let vote_limiter = RateLimiter::new(config.vote_rate_limit(), limit_store);

        Self {
            config: Arc::new(config),
            services: Services::new(repositories),
            pool,
            global_limiter,
            vote_limiter,
        }
    }
}
